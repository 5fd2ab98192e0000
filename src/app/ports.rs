//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ WiperService (domain)
//! ```
//!
//! Driven adapters (sensor, clock, event sinks, config storage) implement
//! these traits.  The [`WiperService`](super::service::WiperService)
//! consumes them via generics, so the domain core never touches a terminal,
//! a file or the system clock directly.

use std::time::Instant;

use crate::config::SystemConfig;
use crate::error::ConfigError;
use crate::sensors::SensorReading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: sensor → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per automatic tick.
pub trait SensorPort {
    /// Take one sample.  Failures are reported in-band as an invalid reading.
    fn read(&mut self) -> SensorReading;

    /// Leave a latched failure state (operator re-engaged automatic mode).
    fn reset_failure(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.  Must never jump backwards.
pub trait Clock {
    fn now(&self) -> Instant;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / display)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, terminal).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting and after
/// loading.  Invalid ranges are rejected with
/// [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration.  Factory defaults when nothing is stored.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}
