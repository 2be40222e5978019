//! Aggregate review statistics and the daily review streak.

use super::card::{Card, Timestamp};
use super::ReviewRecord;
use chrono::{DateTime, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    pub due_cards: usize,
    pub mastered_cards: usize,
    pub reviews_today: usize,
    pub streak_days: u32,
}

impl ReviewStats {
    /// Aggregates the collection and the review log as of `now`.
    pub fn compute(cards: &[Card], reviews: &[ReviewRecord], now: Timestamp) -> Self {
        let today = utc_day(now);
        Self {
            total_cards: cards.len(),
            due_cards: cards.iter().filter(|c| c.is_due(now)).count(),
            mastered_cards: cards.iter().filter(|c| c.is_mastered()).count(),
            reviews_today: reviews
                .iter()
                .filter(|r| today.is_some() && utc_day(r.reviewed_at) == today)
                .count(),
            streak_days: streak_days(reviews, now),
        }
    }
}

fn utc_day(ts: Timestamp) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ts).map(|dt| dt.date_naive())
}

/// Counts consecutive UTC days with at least one review, ending today.
/// A run that ends yesterday still counts since today is not over yet.
pub fn streak_days(reviews: &[ReviewRecord], now: Timestamp) -> u32 {
    let Some(today) = utc_day(now) else {
        return 0;
    };
    let days: BTreeSet<NaiveDate> = reviews
        .iter()
        .filter_map(|r| utc_day(r.reviewed_at))
        .filter(|day| *day <= today)
        .collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}
