//! Timestamp sources for new blocks.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of block timestamps, in nanoseconds since the Unix epoch.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now_nanos(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Current wall-clock time in nanoseconds since the Unix epoch.
    ///
    /// Times before the epoch come back negative; times past year 2262
    /// saturate.
    pub fn nanos() -> i64 {
        let saturate = |nanos: u128| i64::try_from(nanos).unwrap_or(i64::MAX);
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => saturate(since.as_nanos()),
            Err(before) => -saturate(before.duration().as_nanos()),
        }
    }
}

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        Self::nanos()
    }
}

/// Deterministic clock: returns `start`, then `start + step`, and so on.
///
/// Used to make block hashes reproducible across runs.
#[derive(Debug)]
pub struct SteppingClock {
    next: AtomicI64,
    step: i64,
}

impl SteppingClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now_nanos(&self) -> i64 {
        self.next.fetch_add(self.step, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_nanos() > 1_577_836_800_000_000_000);
    }

    #[test]
    fn test_stepping_clock() {
        let clock = SteppingClock::new(100, 10);
        assert_eq!(clock.now_nanos(), 100);
        assert_eq!(clock.now_nanos(), 110);
        assert_eq!(clock.now_nanos(), 120);
    }

    #[test]
    fn test_stepping_clock_zero_step_is_constant() {
        let clock = SteppingClock::new(7, 0);
        assert_eq!(clock.now_nanos(), 7);
        assert_eq!(clock.now_nanos(), 7);
    }
}
