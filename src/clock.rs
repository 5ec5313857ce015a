//! Sources of "now" for the lunar clock.
//!
//! The query engine never reads the time itself; hosts hand it a
//! [`UnixClock`]. Two implementations are provided:
//!
//! * [`SystemClock`]: wall-clock time from the operating system.
//! * [`TransientClock`]: a host-driven clock, advanced explicitly from a
//!   monotonic "time since startup" counter plus a fixed offset. Useful on
//!   devices whose RTC is read once at boot, and for simulations.
use hifitime::Epoch;
use tracing::warn;

use crate::{constants::UnixSeconds, time::epoch_to_unix};

/// Anything able to tell the current unix time in seconds.
pub trait UnixClock {
    fn now(&mut self) -> UnixSeconds;
}

/// Operating system wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    last: UnixSeconds,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnixClock for SystemClock {
    /// Current UTC time. If the system clock cannot be read, the previous
    /// reading (initially 0) is returned again.
    fn now(&mut self) -> UnixSeconds {
        match Epoch::now() {
            Ok(epoch) => self.last = epoch_to_unix(&epoch),
            Err(err) => warn!(%err, last = self.last, "system clock unavailable"),
        }
        self.last
    }
}

/// Clock advanced by the host: `now() = offset + time_since_startup`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransientClock {
    offset: UnixSeconds,
    last: UnixSeconds,
}

impl TransientClock {
    /// Start the clock at `offset` (the unix time at startup).
    pub fn new(offset: UnixSeconds) -> Self {
        TransientClock {
            offset,
            last: offset,
        }
    }

    /// Set the current time to `offset + time_since_startup`, saturating at
    /// `i64::MAX`.
    pub fn update(&mut self, time_since_startup: u64) {
        self.last = self.offset.saturating_add_unsigned(time_since_startup);
    }

    pub fn offset(&self) -> UnixSeconds {
        self.offset
    }
}

impl UnixClock for TransientClock {
    fn now(&mut self) -> UnixSeconds {
        self.last
    }
}

#[cfg(test)]
mod clock_test {
    use super::*;

    #[test]
    fn test_transient_clock() {
        let mut clock = TransientClock::new(1_700_000_000);
        assert_eq!(clock.now(), 1_700_000_000);

        clock.update(42);
        assert_eq!(clock.now(), 1_700_000_042);
        // Reading does not advance the clock
        assert_eq!(clock.now(), 1_700_000_042);

        clock.update(0);
        assert_eq!(clock.now(), 1_700_000_000);
        assert_eq!(clock.offset(), 1_700_000_000);
    }

    #[test]
    fn test_transient_clock_saturates() {
        let mut clock = TransientClock::new(i64::MAX - 1);
        clock.update(u64::MAX);
        assert_eq!(clock.now(), i64::MAX);

        let mut clock = TransientClock::new(-10);
        clock.update(4);
        assert_eq!(clock.now(), -6);
    }

    #[test]
    fn test_system_clock_is_recent() {
        let mut clock = SystemClock::new();
        // 2024-01-01T00:00:00 UTC
        assert!(clock.now() > 1_704_067_200);
    }

    #[test]
    fn test_clock_as_trait_object() {
        let mut clocks: Vec<Box<dyn UnixClock>> = vec![
            Box::new(TransientClock::new(5)),
            Box::new(SystemClock::new()),
        ];
        assert_eq!(clocks[0].now(), 5);
        assert!(clocks[1].now() > 0);
    }
}
