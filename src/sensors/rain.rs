//! Simulated ambient-light rain sensor.
//!
//! Stands in for an optical rain sensor behind the windshield.  Light and
//! dew level are drawn uniformly from 0–100 %; a small per-read chance
//! latches the sensor into a failure state that persists until
//! [`RainSensor::reset_failure`] is called.
//!
//! Burst detection compares each new light value with the previous *valid*
//! one: a drop larger than the configured threshold means heavy rain just
//! started.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::SensorPort;
use crate::config::SystemConfig;
use crate::error::SensorError;

use super::reading::SensorReading;

pub struct RainSensor {
    rng: StdRng,
    failure_probability: f64,
    burst_drop_percent: f64,
    dew_threshold_percent: f64,
    previous_light: f64,
    failed: bool,
    total_reads: u64,
}

impl RainSensor {
    /// Sensor seeded from OS entropy.
    pub fn new(config: &SystemConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic sensor for tests and reproducible sessions.
    pub fn seeded(config: &SystemConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &SystemConfig, rng: StdRng) -> Self {
        Self {
            rng,
            failure_probability: unit_probability(config.sensor_failure_probability),
            burst_drop_percent: config.burst_drop_percent,
            dew_threshold_percent: config.dew_threshold_percent,
            previous_light: config.initial_light_percent,
            failed: false,
            total_reads: 0,
        }
    }

    /// Take one sample.
    pub fn read(&mut self) -> SensorReading {
        self.total_reads = self.total_reads.saturating_add(1);

        match self.sample_light() {
            Ok(light) => {
                let dew_level = self.rng.gen_range(0.0..100.0);
                let sudden_burst = self.previous_light - light > self.burst_drop_percent;
                self.previous_light = light;

                SensorReading {
                    light_percent: light,
                    valid: (0.0..=100.0).contains(&light),
                    sudden_burst,
                    dew_present: dew_level > self.dew_threshold_percent,
                    dew_level,
                }
            }
            Err(e) => {
                debug!("rain sensor read #{}: {e}", self.total_reads);
                SensorReading::invalid()
            }
        }
    }

    /// Leave the latched failure state.
    pub fn reset_failure(&mut self) {
        if self.failed {
            warn!("rain sensor failure state reset");
        }
        self.failed = false;
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn total_reads(&self) -> u64 {
        self.total_reads
    }

    pub fn set_failure_probability(&mut self, probability: f64) {
        self.failure_probability = unit_probability(probability);
    }

    fn sample_light(&mut self) -> Result<f64, SensorError> {
        if !self.failed && self.rng.gen_bool(self.failure_probability) {
            warn!("rain sensor entered failure state");
            self.failed = true;
        }
        if self.failed {
            return Err(SensorError::Failed);
        }
        Ok(self.rng.gen_range(0.0..100.0))
    }
}

/// `gen_bool` panics outside 0–1, NaN included.
fn unit_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

impl SensorPort for RainSensor {
    fn read(&mut self) -> SensorReading {
        RainSensor::read(self)
    }

    fn reset_failure(&mut self) {
        RainSensor::reset_failure(self);
    }
}
