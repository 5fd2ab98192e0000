//! End-to-end scenarios for the decision controller on its own.

use std::time::{Duration, Instant};

use rainwiper::control::{Decision, WiperController, map_light_to_speed};
use rainwiper::modes::{OperatingMode, SprayMode, WiperSpeed};
use rainwiper::sensors::SensorReading;

fn at(t0: Instant, secs: u64) -> Instant {
    t0 + Duration::from_secs(secs)
}

#[test]
fn mapping_boundaries() {
    let cases = [
        (0.0, WiperSpeed::High),
        (19.999, WiperSpeed::High),
        (20.0, WiperSpeed::Medium),
        (49.999, WiperSpeed::Medium),
        (50.0, WiperSpeed::Low),
        (79.999, WiperSpeed::Low),
        (80.0, WiperSpeed::Off),
        (100.0, WiperSpeed::Off),
    ];
    for (light, expected) in cases {
        assert_eq!(map_light_to_speed(light), expected, "light {light}");
    }
}

#[test]
fn medium_rain_clears_then_returns_before_deadline() {
    let t0 = Instant::now();
    let mut c = WiperController::new();

    c.process_sample(&SensorReading::light(30.0), t0);
    assert_eq!(c.wiper_speed(), WiperSpeed::Medium);

    c.process_sample(&SensorReading::light(85.0), at(t0, 1));
    assert!(c.is_turn_off_pending());
    assert_eq!(c.wiper_speed(), WiperSpeed::Medium);
    assert_eq!(c.remaining_turn_off_secs(at(t0, 1)), 10);

    c.process_sample(&SensorReading::light(25.0), at(t0, 5));
    assert!(!c.is_turn_off_pending());
    assert_eq!(c.wiper_speed(), WiperSpeed::Medium);
}

#[test]
fn repeated_clear_samples_stop_after_delay() {
    let t0 = Instant::now();
    let mut c = WiperController::new();
    c.process_sample(&SensorReading::light(35.0), t0);

    let clear = SensorReading::light(92.0);
    let mut decisions = Vec::new();
    for s in 1..=12 {
        decisions.push(c.process_sample(&clear, at(t0, s)));
        let elapsed = s - 1;
        if elapsed < 10 {
            assert_eq!(c.wiper_speed(), WiperSpeed::Medium, "{elapsed}s after arming");
        }
    }
    assert_eq!(decisions[0], Decision::TurnOffArmed);
    assert_eq!(decisions[10], Decision::TurnedOff);
    assert_eq!(decisions[11], Decision::Idle);
    assert_eq!(c.wiper_speed(), WiperSpeed::Off);
}

#[test]
fn storm_sequence() {
    let t0 = Instant::now();
    let mut c = WiperController::new();
    let script = [
        (SensorReading::light(90.0), WiperSpeed::Off),
        (SensorReading::light(55.0), WiperSpeed::Low),
        (SensorReading::light(15.0).with_burst(true), WiperSpeed::High),
        (SensorReading::light(40.0), WiperSpeed::Medium),
        (SensorReading::invalid(), WiperSpeed::Low),
        (SensorReading::light(10.0), WiperSpeed::High),
    ];
    for (i, (reading, expected)) in script.iter().enumerate() {
        c.process_sample(reading, at(t0, i as u64));
        assert_eq!(c.wiper_speed(), *expected, "step {i}");
    }
}

#[test]
fn manual_settings_survive_round_trip_through_auto() {
    let t0 = Instant::now();
    let mut c = WiperController::new();
    c.set_operating_mode(OperatingMode::Manual);
    c.set_wiper_speed(WiperSpeed::Low);
    c.set_spray_mode(SprayMode::LightSpray);

    c.set_operating_mode(OperatingMode::Automatic);
    c.process_sample(&SensorReading::light(60.0), t0);
    c.set_operating_mode(OperatingMode::Manual);

    assert_eq!(c.wiper_speed(), WiperSpeed::Low);
    assert_eq!(c.spray_mode(), SprayMode::LightSpray);
}
