//! Light-to-speed threshold mapping and the spray→wiper coupling table.

use crate::config::SystemConfig;
use crate::modes::{SprayMode, WiperSpeed};

/// Lower bounds (inclusive) of the OFF, LOW and MEDIUM brackets.
/// Anything below `medium_percent` is HIGH.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedThresholds {
    pub off_percent: f64,
    pub low_percent: f64,
    pub medium_percent: f64,
}

impl SpeedThresholds {
    pub const DEFAULT: Self = Self {
        off_percent: 80.0,
        low_percent: 50.0,
        medium_percent: 20.0,
    };

    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            off_percent: config.off_threshold_percent,
            low_percent: config.low_threshold_percent,
            medium_percent: config.medium_threshold_percent,
        }
    }

    /// Total over every `f64`: no clamping, so >100 maps to OFF and <0 to
    /// HIGH.  NaN fails every comparison and lands on HIGH.
    pub fn map(&self, light_percent: f64) -> WiperSpeed {
        if light_percent >= self.off_percent {
            WiperSpeed::Off
        } else if light_percent >= self.low_percent {
            WiperSpeed::Low
        } else if light_percent >= self.medium_percent {
            WiperSpeed::Medium
        } else {
            WiperSpeed::High
        }
    }
}

impl Default for SpeedThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Map a light reading to a wiper speed with the factory thresholds.
pub fn map_light_to_speed(light_percent: f64) -> WiperSpeed {
    SpeedThresholds::DEFAULT.map(light_percent)
}

/// Wiper speed forced when spray is activated together with the wipers.
/// `SprayMode::Off` has no entry.
pub const SPRAY_WIPER_COUPLING: [(SprayMode, WiperSpeed); 2] = [
    (SprayMode::LightSpray, WiperSpeed::Low),
    (SprayMode::HeavySpray, WiperSpeed::Medium),
];

pub fn coupled_wiper_speed(spray: SprayMode) -> Option<WiperSpeed> {
    SPRAY_WIPER_COUPLING
        .iter()
        .find(|(mode, _)| *mode == spray)
        .map(|&(_, speed)| speed)
}
