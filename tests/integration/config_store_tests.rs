//! Configuration loading through the `ConfigPort` boundary.

use std::time::Instant;

use rainwiper::app::ports::ConfigPort;
use rainwiper::app::service::WiperService;
use rainwiper::config::SystemConfig;
use rainwiper::error::ConfigError;
use rainwiper::modes::{OperatingMode, WiperSpeed};

use super::mock_hw::{ManualClock, MemoryConfig, RecordingSink, ScriptedSensor};

#[test]
fn empty_store_loads_defaults() {
    let store = MemoryConfig::default();
    assert_eq!(store.load().unwrap(), SystemConfig::default());
}

#[test]
fn invalid_config_is_not_persisted() {
    let store = MemoryConfig::default();
    let bad = SystemConfig {
        sensor_failure_probability: 1.5,
        ..Default::default()
    };
    assert!(matches!(store.save(&bad), Err(ConfigError::ValidationFailed(_))));
    assert_eq!(store.load().unwrap(), SystemConfig::default());
}

#[test]
fn stored_thresholds_drive_the_service() {
    let store = MemoryConfig::default();
    store
        .save(&SystemConfig {
            off_threshold_percent: 60.0,
            low_threshold_percent: 40.0,
            medium_threshold_percent: 10.0,
            turn_off_delay_secs: 2,
            ..Default::default()
        })
        .unwrap();

    let mut svc = WiperService::new(&store.load().unwrap());
    let mut sink = RecordingSink::new();
    let clock = ManualClock::new();
    let mut sensor = ScriptedSensor::lights(&[45.0, 65.0, 65.0, 65.0]);
    svc.start(OperatingMode::Automatic, &mut sink);

    assert_eq!(svc.tick(&mut sensor, &clock, &mut sink).speed, WiperSpeed::Low);
    clock.advance_secs(1);
    let armed = svc.tick(&mut sensor, &clock, &mut sink);
    assert_eq!(armed.turn_off_remaining_secs, Some(2));
    clock.advance_secs(2);
    assert_eq!(svc.tick(&mut sensor, &clock, &mut sink).speed, WiperSpeed::Off);
    assert!(svc.status(Instant::now()).turn_off_remaining_secs.is_none());
}
