//! Deterministic clock for tests.

use harvest_types::Timestamp;
use std::cell::Cell;

/// A clock that only moves when the test says so.
///
/// Engine operations take an explicit `now`, so tests thread this
/// clock's reading through each call and every accrual window comes out
/// exact to the second.
pub struct NullClock {
    secs: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            secs: Cell::new(initial_secs),
        }
    }

    /// The clock's current reading.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.get())
    }

    /// Move the clock forward by `secs` seconds.
    pub fn advance(&self, secs: u64) {
        self.secs.set(self.secs.get() + secs);
    }
}
