//! Monotonic time adapter.
//!
//! Wraps `std::time::Instant` behind the [`Clock`] port and remembers when
//! the session started, so the console can stamp status lines with uptime.

use core::time::Duration;
use std::time::Instant;

use crate::app::ports::Clock;

pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since the clock was created.
    pub fn uptime(&self) -> Duration {
        self.start.elapsed()
    }

    /// Seconds since the clock was created.
    pub fn uptime_secs(&self) -> u64 {
        self.uptime().as_secs()
    }

    /// Session instant the clock was created at.
    pub fn started_at(&self) -> Instant {
        self.start
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
