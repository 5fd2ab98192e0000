//! Delayed wiper shutoff.

use core::time::Duration;
use std::time::Instant;

/// An armed turn-off: the wipers stop once a sample observed at or after
/// `deadline` still maps to OFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTurnOff {
    armed_at: Instant,
    deadline: Instant,
}

impl PendingTurnOff {
    pub fn arm(now: Instant, delay: Duration) -> Self {
        Self {
            armed_at: now,
            deadline: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Whole seconds left, counted the way the dashboard shows them:
    /// the full delay minus the whole seconds elapsed since arming.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let delay = self.deadline.duration_since(self.armed_at).as_secs();
        let elapsed = now.saturating_duration_since(self.armed_at).as_secs();
        delay.saturating_sub(elapsed)
    }
}
