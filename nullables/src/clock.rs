//! Nullable clock: deterministic logical time.

use quorum_types::{Clock, Timestamp};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A deterministic clock.
///
/// Time only advances when you tell it to. Clones share the same counter, so
/// a test can keep a handle after giving one to the engine.
#[derive(Clone, Debug, Default)]
pub struct NullClock {
    current: Arc<AtomicU64>,
}

impl NullClock {
    pub fn new(initial_ticks: u64) -> Self {
        Self {
            current: Arc::new(AtomicU64::new(initial_ticks)),
        }
    }

    /// Advance time by a number of ticks.
    pub fn advance(&self, ticks: u64) {
        self.current.fetch_add(ticks, Ordering::SeqCst);
    }

    /// Set the time to a specific tick.
    pub fn set(&self, ticks: u64) {
        self.current.store(ticks, Ordering::SeqCst);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.current.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let clock = NullClock::new(5);
        let handle = clock.clone();
        handle.advance(3);
        assert_eq!(clock.now(), Timestamp::new(8));
        clock.set(1);
        assert_eq!(handle.now(), Timestamp::new(1));
    }
}
