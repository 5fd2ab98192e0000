//! One sampled observation from the rain/light sensor.

use crate::error::SensorError;

/// Light value carried by a failed reading.  Not meaningful; never mapped.
pub const INVALID_LIGHT_PERCENT: f64 = -1.0;

/// A point-in-time reading, produced fresh for every sample and consumed
/// once by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    /// Ambient light (0–100 %).  Lower means more precipitation.
    pub light_percent: f64,
    /// False when the sensor failed; `light_percent` is then a sentinel.
    pub valid: bool,
    /// Light dropped by more than the burst threshold since the previous
    /// valid reading.
    pub sudden_burst: bool,
    /// Dew detected on the glass (informational).
    pub dew_present: bool,
    /// Dew level (0–100 %).
    pub dew_level: f64,
}

impl SensorReading {
    /// A valid reading with no burst and no dew.
    pub const fn light(light_percent: f64) -> Self {
        Self {
            light_percent,
            valid: true,
            sudden_burst: false,
            dew_present: false,
            dew_level: 0.0,
        }
    }

    /// The reading a failed sensor produces.
    pub const fn invalid() -> Self {
        Self {
            light_percent: INVALID_LIGHT_PERCENT,
            valid: false,
            sudden_burst: false,
            dew_present: false,
            dew_level: 0.0,
        }
    }

    #[must_use]
    pub const fn with_burst(mut self, sudden_burst: bool) -> Self {
        self.sudden_burst = sudden_burst;
        self
    }

    #[must_use]
    pub const fn with_dew(mut self, dew_present: bool, dew_level: f64) -> Self {
        self.dew_present = dew_present;
        self.dew_level = dew_level;
        self
    }

    /// The light value if it can be trusted for display or diagnostics.
    ///
    /// The controller does not use this: it maps any valid light value,
    /// in range or not.
    pub fn checked_light(&self) -> Result<f64, SensorError> {
        if !self.valid {
            return Err(SensorError::Failed);
        }
        if (0.0..=100.0).contains(&self.light_percent) {
            Ok(self.light_percent)
        } else {
            Err(SensorError::OutOfRange)
        }
    }
}
