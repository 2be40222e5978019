//! Time source for the scheduler.
use crate::models::Timestamp;
use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock in epoch milliseconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reads as the epoch
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to. Used to simulate days passing.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    /// Clock stopped at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jumps to `now`, forwards or backwards.
    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    /// Moves forward by `millis`, stopping at the largest timestamp.
    pub fn advance(&self, millis: Timestamp) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    /// Advances by whole 24 hour days.
    pub fn advance_days(&self, days: i64) {
        self.advance(days.saturating_mul(crate::models::DAY_MS));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}
