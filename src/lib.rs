//! Rain-sensing windshield wiper controller.
//!
//! Exposes the pure-logic modules for integration testing and for the
//! console binary.  Terminal-specific code lives behind the `console`
//! feature inside [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod modes;
pub mod safety;
pub mod scheduler;
pub mod sensors;
