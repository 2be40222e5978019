use super::card::Timestamp;
use super::Grade;
use serde::{Deserialize, Serialize};

/// One grading event, appended to the review log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub card_id: String,
    pub grade: Grade,
    pub reviewed_at: Timestamp,
    pub box_after: u8,
    pub interval_after: u32,
}
