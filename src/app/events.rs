//! Outbound application events.
//!
//! The [`WiperService`](super::service::WiperService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log them, paint a status line, etc.

use crate::modes::{OperatingMode, SprayMode, WiperSpeed};

/// Operator alert shown while the sensor-failure fault is active.
pub const SENSOR_FAILURE_ALERT: &str = "Sensor Failure - Switch to Manual";

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Per-tick status snapshot.
    Status(StatusReport),

    /// The service has started (carries initial mode).
    Started(OperatingMode),

    /// The session was asked to stop.
    Stopped,

    ModeChanged { from: OperatingMode, to: OperatingMode },

    SpeedChanged { from: WiperSpeed, to: WiperSpeed },

    SprayChanged { from: SprayMode, to: SprayMode },

    /// Conditions cleared; the wipers stop in `delay_secs` unless rain returns.
    TurnOffArmed { delay_secs: u64 },

    /// Rain returned (or an override fired) before the turn-off deadline.
    TurnOffCancelled,

    /// A sudden rain burst was detected.
    RainBurst { light_percent: f64 },

    /// One or more sensor faults were raised (bitmask).
    FaultDetected(u8),

    /// All sensor faults have been cleared.
    FaultCleared,

    /// A manual-only command arrived in automatic mode and was dropped.
    CommandIgnored(&'static str),
}

/// A point-in-time status snapshot suitable for display or logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub mode: OperatingMode,
    pub speed: WiperSpeed,
    pub spray: SprayMode,
    /// Light of the last sample; `None` in manual mode or on sensor failure.
    pub light_percent: Option<f64>,
    /// False when the last sample was invalid.
    pub sensor_ok: bool,
    pub sudden_burst: bool,
    /// Dew level of a manual-mode sample with dew present; always `None` in
    /// automatic mode.
    pub dew_level: Option<f64>,
    /// Seconds until the wipers stop, while a turn-off is pending.
    pub turn_off_remaining_secs: Option<u64>,
    pub alert: Option<&'static str>,
}
