//! Time sources.

use crate::ports::TimeSource;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use shared_types::Timestamp;

/// Wall clock in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Manually driven clock for tests.
#[derive(Debug)]
pub struct FixedTimeSource {
    now: Mutex<Timestamp>,
}

impl FixedTimeSource {
    /// Clock stopped at `at`.
    pub fn new(at: Timestamp) -> Self {
        Self { now: Mutex::new(at) }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    /// Jump to `at`.
    pub fn set(&self, at: Timestamp) {
        *self.now.lock() = at;
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_advances() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let clock = FixedTimeSource::new(start);
        assert_eq!(clock.now(), start);
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));
    }
}
