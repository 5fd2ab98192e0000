//! Application core: session orchestration, zero I/O.
//!
//! This module wires the sensor supervisor and the wiper controller into a
//! session that reacts to ticks and driver commands.  All interaction with
//! the sensor, the clock and the display happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without a
//! terminal.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
