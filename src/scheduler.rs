//! Sample cadence.
//!
//! The console loop polls input far more often than it samples the
//! sensor.  [`Cadence`] decides when the next sample is due.
//!
//! ```text
//!  poll ─ poll ─ poll ─ … ─ poll ──▶ due? ──yes──▶ WiperService::tick()
//!  └──── input_poll_interval ────┘     └── sample_interval ──┘
//! ```

use core::time::Duration;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    interval: Duration,
    /// `None` until the first tick, which is due immediately.
    last: Option<Instant>,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True when a full interval has passed since the last [`reset`](Self::reset).
    pub fn due(&self, now: Instant) -> bool {
        self.last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    pub fn reset(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Time left until the next sample; zero when already due.
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.last.map_or(Duration::ZERO, |last| {
            self.interval
                .saturating_sub(now.saturating_duration_since(last))
        })
    }
}
