//! Wiper decision controller.
//!
//! Turns sensor readings into a commanded wiper speed.  Each automatic
//! sample goes through three checks in priority order:
//!
//! ```text
//!   reading ──▶ invalid? ──yes──▶ LOW   (fail-safe, visibility first)
//!                 │no
//!                 ▼
//!              burst?  ──yes──▶ HIGH  (overrides the mapping)
//!                 │no
//!                 ▼
//!            map(light) ──▶ target
//!                 │
//!   target != OFF ──▶ apply immediately, cancel countdown
//!   target == OFF, wipers running ──▶ arm / run / commit countdown
//!   target == OFF, wipers stopped ──▶ nothing
//! ```
//!
//! Only the final transition to OFF is debounced; every other speed change
//! takes effect on the sample that asks for it.  Spray is never touched by
//! sample processing.

pub mod mapping;
pub mod turn_off;

use core::time::Duration;
use std::time::Instant;

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::modes::{OperatingMode, SprayMode, WiperSpeed};
use crate::sensors::SensorReading;

pub use mapping::{SpeedThresholds, coupled_wiper_speed, map_light_to_speed};
pub use turn_off::PendingTurnOff;

/// Default turn-off grace period.
pub const TURN_OFF_DELAY: Duration = Duration::from_secs(10);

/// Which branch a sample took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Invalid reading; wipers forced to LOW.
    SensorFallback,
    /// Sudden rain burst; wipers forced to HIGH.
    BurstOverride,
    /// Mapped speed applied immediately.
    Applied(WiperSpeed),
    /// Conditions cleared; countdown started, wipers still running.
    TurnOffArmed,
    /// Countdown running.
    CountingDown { remaining_secs: u64 },
    /// Countdown expired; wipers stopped.
    TurnedOff,
    /// Wipers already stopped and conditions clear.
    Idle,
}

pub struct WiperController {
    speed: WiperSpeed,
    mode: OperatingMode,
    spray: SprayMode,
    turn_off: Option<PendingTurnOff>,
    thresholds: SpeedThresholds,
    turn_off_delay: Duration,
}

impl Default for WiperController {
    fn default() -> Self {
        Self::new()
    }
}

impl WiperController {
    /// OFF / AUTOMATIC / spray OFF, factory thresholds and delay.
    pub fn new() -> Self {
        Self {
            speed: WiperSpeed::Off,
            mode: OperatingMode::Automatic,
            spray: SprayMode::Off,
            turn_off: None,
            thresholds: SpeedThresholds::DEFAULT,
            turn_off_delay: TURN_OFF_DELAY,
        }
    }

    pub fn with_config(config: &SystemConfig) -> Self {
        Self {
            thresholds: SpeedThresholds::from_config(config),
            turn_off_delay: config.turn_off_delay(),
            ..Self::new()
        }
    }

    pub fn map_light_to_speed(&self, light_percent: f64) -> WiperSpeed {
        self.thresholds.map(light_percent)
    }

    // ── Automatic decision step ───────────────────────────────

    /// Process one automatic-mode sample taken at `now` (monotonic).
    pub fn process_sample(&mut self, reading: &SensorReading, now: Instant) -> Decision {
        let spray_before = self.spray;

        if !reading.valid {
            if self.speed != WiperSpeed::Low {
                warn!("sensor failure: wipers {} -> LOW (fail-safe)", self.speed);
            }
            self.speed = WiperSpeed::Low;
            self.turn_off = None;
            return Decision::SensorFallback;
        }

        if reading.sudden_burst {
            if self.speed != WiperSpeed::High {
                info!(
                    "sudden rain burst at {:.1}%: wipers {} -> HIGH",
                    reading.light_percent, self.speed
                );
            }
            self.speed = WiperSpeed::High;
            self.turn_off = None;
            return Decision::BurstOverride;
        }

        let target = self.thresholds.map(reading.light_percent);
        let decision = self.apply_target(target, now);

        // Nothing above may change spray; restore it regardless.
        self.spray = spray_before;
        decision
    }

    fn apply_target(&mut self, target: WiperSpeed, now: Instant) -> Decision {
        match (target, self.speed) {
            (WiperSpeed::Off, WiperSpeed::Off) => {
                self.turn_off = None;
                Decision::Idle
            }
            (WiperSpeed::Off, running) => match self.turn_off {
                None => {
                    self.turn_off = Some(PendingTurnOff::arm(now, self.turn_off_delay));
                    info!(
                        "conditions clear: wipers stay {running} for {}s",
                        self.turn_off_delay.as_secs()
                    );
                    Decision::TurnOffArmed
                }
                Some(pending) if pending.is_due(now) => {
                    self.speed = WiperSpeed::Off;
                    self.turn_off = None;
                    info!("turn-off delay elapsed: wipers {running} -> OFF");
                    Decision::TurnedOff
                }
                Some(pending) => {
                    let remaining_secs = pending.remaining_secs(now);
                    debug!("turning off in {remaining_secs}s");
                    Decision::CountingDown { remaining_secs }
                }
            },
            (target, current) => {
                if self.turn_off.take().is_some() {
                    info!("rain returned: turn-off cancelled");
                }
                if target != current {
                    info!("wipers {current} -> {target}");
                }
                self.speed = target;
                Decision::Applied(target)
            }
        }
    }

    // ── Turn-off queries ──────────────────────────────────────

    pub fn is_turn_off_pending(&self) -> bool {
        self.turn_off.is_some()
    }

    /// Seconds left before the wipers stop; 0 when nothing is pending.
    pub fn remaining_turn_off_secs(&self, now: Instant) -> u64 {
        self.turn_off.map_or(0, |p| p.remaining_secs(now))
    }

    pub fn pending_turn_off(&self) -> Option<PendingTurnOff> {
        self.turn_off
    }

    pub fn turn_off_delay(&self) -> Duration {
        self.turn_off_delay
    }

    // ── Manual operations ─────────────────────────────────────

    /// Leaves spray and any pending turn-off alone.
    pub fn set_wiper_speed(&mut self, speed: WiperSpeed) {
        self.speed = speed;
    }

    /// Switching modes resets nothing, so switching back restores the
    /// previous manual settings.
    pub fn set_operating_mode(&mut self, mode: OperatingMode) {
        self.mode = mode;
    }

    pub fn set_spray_mode(&mut self, spray: SprayMode) {
        self.spray = spray;
    }

    /// Spray and run the wipers at the coupled speed (dew clearing).
    /// `SprayMode::Off` switches spray off without touching the wipers.
    pub fn activate_spray_with_wiper(&mut self, spray: SprayMode) {
        self.spray = spray;
        if let Some(speed) = coupled_wiper_speed(spray) {
            self.speed = speed;
        }
    }

    // ── State queries ─────────────────────────────────────────

    pub fn wiper_speed(&self) -> WiperSpeed {
        self.speed
    }

    pub fn operating_mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn spray_mode(&self) -> SprayMode {
        self.spray
    }
}
