//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements | Connects to                    |
//! |----------------|------------|--------------------------------|
//! | `config_file`  | ConfigPort | JSON file on disk              |
//! | `console`      | EventSink  | Terminal (crossterm)           |
//! | `log_sink`     | EventSink  | `log` facade                   |
//! | `time`         | Clock      | `std::time::Instant`           |
//!
//! The simulated rain sensor implements `SensorPort` directly
//! (see [`crate::sensors::RainSensor`]).

pub mod config_file;
#[cfg(feature = "console")]
pub mod console;
pub mod log_sink;
pub mod time;
