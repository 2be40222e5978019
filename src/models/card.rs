//! A flashcard together with its Leitner review state.
use serde::{Deserialize, Serialize};

/// Epoch milliseconds.
pub type Timestamp = i64;

pub const DAY_MS: Timestamp = 86_400_000;

pub const MASTERED_BOX: u8 = 5;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub deck_id: String,
    pub front: String,
    pub back: String,
    /// Leitner box, 0 for a card that was never reviewed.
    #[serde(rename = "box")]
    pub leitner_box: u8,
    /// Days until the next review.
    pub interval: u32,
    pub due_date: Timestamp,
    /// 0 if never reviewed.
    pub last_reviewed: Timestamp,
    /// Not used by the Leitner rules. Stored so it survives a save/load cycle.
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
}

fn default_ease_factor() -> f64 {
    DEFAULT_EASE_FACTOR
}

impl Card {
    /// New card, due immediately.
    pub fn new(id: &str, deck_id: &str, front: &str, back: &str, now: Timestamp) -> Self {
        Self {
            id: id.to_string(),
            deck_id: deck_id.to_string(),
            front: front.to_string(),
            back: back.to_string(),
            leitner_box: 0,
            interval: 0,
            due_date: now,
            last_reviewed: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
        }
    }

    /// Pulls `leitner_box` back into `0..=5`. Returns true if it was out of range.
    pub fn clamp_box(&mut self) -> bool {
        if self.leitner_box > MASTERED_BOX {
            self.leitner_box = MASTERED_BOX;
            return true;
        }
        false
    }

    /// Due once `due_date` has been reached.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.due_date <= now
    }

    /// Mastered cards sit in the last box.
    pub fn is_mastered(&self) -> bool {
        self.leitner_box == MASTERED_BOX
    }
}
