//! Clocks for polled components
//!
//! The scheduler only needs "now" in milliseconds. Where it comes from depends on
//! the platform:
//! - System clock (hosted builds): [`SystemTime`]
//! - Monotonic tick counter (bare metal): any `Fn() -> Timestamp` supplied by the
//!   firmware, e.g. a closure reading a hardware timer
//! - Manually advanced clock (tests): [`FixedTime`]
//!
//! Only differences between two readings matter, so the epoch is irrelevant.

/// Milliseconds since an arbitrary epoch (Unix epoch or device boot)
pub type Timestamp = u64;

/// Anything that can tell the current time
pub trait TimeSource {
    /// Current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

impl<F> TimeSource for F
where
    F: Fn() -> Timestamp,
{
    fn now(&self) -> Timestamp {
        self()
    }
}

/// Wall clock of the host (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Start at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`, backwards included
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`, saturating at `Timestamp::MAX`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp = self.timestamp.saturating_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn fixed_time_advances() {
        let mut clock = FixedTime::new(1_000);
        assert_eq!(clock.now(), 1_000);
        clock.advance(250);
        assert_eq!(clock.now(), 1_250);
        clock.set(u64::MAX);
        clock.advance(1);
        assert_eq!(clock.now(), u64::MAX);
    }

    #[test]
    fn tick_counter_closure() {
        let ticks = Cell::new(0u64);
        let clock = || ticks.get();
        assert_eq!(clock.now(), 0);
        ticks.set(42);
        assert_eq!(TimeSource::now(&clock), 42);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_time_is_after_epoch() {
        assert!(SystemTime.now() > 0);
    }
}
