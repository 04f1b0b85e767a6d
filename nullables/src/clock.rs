//! Nullable clock.

use std::cell::Cell;
use weir_types::Timestamp;

/// A clock that stands still until told otherwise.
///
/// Holds a [`Timestamp`] directly, so `now()` hands out exactly what lock
/// checks consume. Advancing saturates the same way `Timestamp::plus` does.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(Timestamp::new(initial_secs)),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.current.get()
    }

    /// Move time forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().plus(secs));
    }

    /// Jump to an absolute time.
    pub fn set(&self, secs: u64) {
        self.current.set(Timestamp::new(secs));
    }
}
