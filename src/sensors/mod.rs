//! Sensor subsystem: the reading model and the simulated rain sensor.
//!
//! Anything that can produce a [`SensorReading`] per tick plugs into the
//! service through [`SensorPort`](crate::app::ports::SensorPort); the
//! simulated [`RainSensor`] is the one shipped here.

pub mod rain;
pub mod reading;

pub use rain::RainSensor;
pub use reading::SensorReading;
