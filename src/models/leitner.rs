//! Leitner box scheduling rules.
//!
//! Each card sits in a box from 0 (new) to 5 (mastered). A grade moves the card:
//! - again: back to box 1, due tomorrow
//! - hard: stays in its box (a new card enters box 1)
//! - good: up one box
//! - easy: up two boxes
//!
//! Box `n` maps to `INTERVALS[n - 1]` days; box 5 keeps using the last interval.

use super::card::{Card, DAY_MS, MASTERED_BOX, Timestamp};
use super::Grade;

/// Review interval in days for boxes 1 through 5.
pub const INTERVALS: [u32; 5] = [1, 3, 7, 14, 30];

/// Box a card lands in after being graded.
pub fn next_box(current_box: u8, grade: Grade) -> u8 {
    let current_box = current_box.min(MASTERED_BOX);
    match grade {
        Grade::Again => 1,
        Grade::Hard => current_box.max(1),
        Grade::Good => (current_box + 1).min(MASTERED_BOX),
        Grade::Easy => (current_box + 2).min(MASTERED_BOX),
    }
}

/// Interval in days for a box. Box 0 has no interval of its own.
pub fn interval_for_box(leitner_box: u8) -> u32 {
    if leitner_box == 0 {
        return 0;
    }
    let idx = (leitner_box as usize - 1).min(INTERVALS.len() - 1);
    INTERVALS[idx]
}

/// Returns the card as it looks after being graded at `now`.
/// Identity, content and ease factor are carried over unchanged.
pub fn apply_review(card: &Card, grade: Grade, now: Timestamp) -> Card {
    let new_box = next_box(card.leitner_box, grade);
    let new_interval = interval_for_box(new_box);

    Card {
        leitner_box: new_box,
        interval: new_interval,
        due_date: now.saturating_add(new_interval as Timestamp * DAY_MS),
        last_reviewed: now,
        ..card.clone()
    }
}

/// Intervals each grade would give, in the order again, hard, good, easy.
pub fn preview_intervals(card: &Card) -> [u32; 4] {
    Grade::ALL.map(|grade| interval_for_box(next_box(card.leitner_box, grade)))
}
