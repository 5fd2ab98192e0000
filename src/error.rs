//! Error types for the wiper controller.
//!
//! Subsystem enums are `Copy` so they can be passed through the supervisor
//! and service without allocation.  The binary wraps them in `anyhow` at the
//! top level.
//!
//! The decision core itself never returns an error: invalid readings take
//! the safety fallback.  These types cover reading classification,
//! configuration and the fault bitmask.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor is in its failure state and produced no light value.
    Failed,
    /// Reading is flagged valid but lies outside 0–100 %.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed => write!(f, "sensor failure"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`ConfigPort`](crate::app::ports::ConfigPort) operations and
/// [`SystemConfig::validate`](crate::config::SystemConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Safety faults
// ---------------------------------------------------------------------------

/// Faults raised by the [`SensorSupervisor`](crate::safety::SensorSupervisor).
///
/// Accumulated in a bitfield so several can be active at once and cleared
/// individually.  They never stop the wipers: the controller already falls
/// back to LOW on a failed reading.  They drive the operator alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SafetyFault {
    /// The sensor reported an invalid reading.
    SensorFailure = 0b0000_0001,
    /// A valid reading carried a light value outside 0–100 %.
    LightOutOfRange = 0b0000_0010,
}

impl SafetyFault {
    pub const ALL: [Self; 2] = [Self::SensorFailure, Self::LightOutOfRange];

    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for SafetyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorFailure => write!(f, "sensor failure"),
            Self::LightOutOfRange => write!(f, "light reading out of range"),
        }
    }
}

impl From<SensorError> for SafetyFault {
    fn from(e: SensorError) -> Self {
        match e {
            SensorError::Failed => Self::SensorFailure,
            SensorError::OutOfRange => Self::LightOutOfRange,
        }
    }
}
