//! System configuration parameters
//!
//! All tunable parameters for the wiper system.  Defaults reproduce the
//! factory behaviour; values can be overridden from a JSON file through
//! [`ConfigPort`](crate::app::ports::ConfigPort).

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Speed mapping ---
    /// Light (%) at or above which the wipers should stop
    pub off_threshold_percent: f64,
    /// Light (%) at or above which LOW speed is selected
    pub low_threshold_percent: f64,
    /// Light (%) at or above which MEDIUM speed is selected; below is HIGH
    pub medium_threshold_percent: f64,

    // --- Turn-off delay ---
    /// Grace period before the wipers actually stop (seconds)
    pub turn_off_delay_secs: u16,

    // --- Sensor ---
    /// Drop in light (% points) from the previous reading that counts as a burst
    pub burst_drop_percent: f64,
    /// Per-read probability that the simulated sensor enters its failure state
    pub sensor_failure_probability: f64,
    /// Dew level (%) above which dew is reported
    pub dew_threshold_percent: f64,
    /// Light (%) the simulated sensor assumes before its first read
    pub initial_light_percent: f64,

    // --- Timing ---
    /// Sensor sample / decision interval (milliseconds)
    pub sample_interval_ms: u32,
    /// Console input poll interval (milliseconds)
    pub input_poll_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Speed mapping
            off_threshold_percent: 80.0,
            low_threshold_percent: 50.0,
            medium_threshold_percent: 20.0,

            // Turn-off delay
            turn_off_delay_secs: 10,

            // Sensor
            burst_drop_percent: 30.0,
            sensor_failure_probability: 0.01, // 1 % per read
            dew_threshold_percent: 60.0,
            initial_light_percent: 95.0,

            // Timing
            sample_interval_ms: 1000,   // 1 Hz
            input_poll_interval_ms: 50, // 20 Hz
        }
    }
}

impl SystemConfig {
    /// Reject out-of-range values.  Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_percent = |v: f64| (0.0..=100.0).contains(&v);

        if !in_percent(self.off_threshold_percent)
            || !in_percent(self.low_threshold_percent)
            || !in_percent(self.medium_threshold_percent)
        {
            return Err(ConfigError::ValidationFailed(
                "speed thresholds must lie within 0-100 %",
            ));
        }
        if !(self.medium_threshold_percent < self.low_threshold_percent
            && self.low_threshold_percent < self.off_threshold_percent)
        {
            return Err(ConfigError::ValidationFailed(
                "speed thresholds must satisfy medium < low < off",
            ));
        }
        if self.turn_off_delay_secs == 0 {
            return Err(ConfigError::ValidationFailed("turn_off_delay_secs must be > 0"));
        }
        if !(self.burst_drop_percent > 0.0 && self.burst_drop_percent <= 100.0) {
            return Err(ConfigError::ValidationFailed(
                "burst_drop_percent must lie within (0, 100]",
            ));
        }
        if !(0.0..=1.0).contains(&self.sensor_failure_probability) {
            return Err(ConfigError::ValidationFailed(
                "sensor_failure_probability must lie within 0-1",
            ));
        }
        if !in_percent(self.dew_threshold_percent) || !in_percent(self.initial_light_percent) {
            return Err(ConfigError::ValidationFailed(
                "dew_threshold_percent and initial_light_percent must lie within 0-100 %",
            ));
        }
        if self.input_poll_interval_ms == 0 || self.input_poll_interval_ms >= self.sample_interval_ms
        {
            return Err(ConfigError::ValidationFailed(
                "input_poll_interval_ms must be > 0 and below sample_interval_ms",
            ));
        }
        Ok(())
    }

    pub fn turn_off_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.turn_off_delay_secs))
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.sample_interval_ms))
    }

    pub fn input_poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.input_poll_interval_ms))
    }
}
