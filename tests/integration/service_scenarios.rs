//! Integration tests for the WiperService → supervisor → controller pipeline.
//!
//! These drive whole sessions (ticks plus driver commands) through mock
//! adapters and assert on the emitted event stream.

use rainwiper::app::commands::WiperCommand;
use rainwiper::app::events::{AppEvent, SENSOR_FAILURE_ALERT};
use rainwiper::app::ports::Clock;
use rainwiper::app::service::WiperService;
use rainwiper::config::SystemConfig;
use rainwiper::error::SafetyFault;
use rainwiper::modes::{OperatingMode, SprayMode, WiperSpeed};
use rainwiper::sensors::{RainSensor, SensorReading};

use super::mock_hw::{ManualClock, RecordingSink, ScriptedSensor};

fn make_service(mode: OperatingMode) -> (WiperService, ManualClock, RecordingSink) {
    let mut svc = WiperService::new(&SystemConfig::default());
    let mut sink = RecordingSink::new();
    svc.start(mode, &mut sink);
    (svc, ManualClock::new(), sink)
}

#[test]
fn start_emits_started_event() {
    let (svc, _, sink) = make_service(OperatingMode::Manual);
    assert!(svc.is_running());
    assert_eq!(sink.events, vec![AppEvent::Started(OperatingMode::Manual)]);
}

#[test]
fn automatic_session_follows_the_rain() {
    let (mut svc, clock, mut sink) = make_service(OperatingMode::Automatic);
    let mut sensor = ScriptedSensor::lights(&[30.0, 85.0, 25.0]);

    for _ in 0..3 {
        svc.tick(&mut sensor, &clock, &mut sink);
        clock.advance_secs(1);
    }

    let speeds: Vec<_> = sink.statuses().iter().map(|s| s.speed).collect();
    assert_eq!(speeds, [WiperSpeed::Medium; 3]);
    assert!(sink.contains(&AppEvent::TurnOffArmed { delay_secs: 10 }));
    assert!(sink.contains(&AppEvent::TurnOffCancelled));
    assert_eq!(sink.statuses()[1].turn_off_remaining_secs, Some(10));
    assert_eq!(sink.statuses()[2].turn_off_remaining_secs, None);
}

#[test]
fn burst_is_reported_and_forces_high() {
    let (mut svc, clock, mut sink) = make_service(OperatingMode::Automatic);
    let mut sensor = ScriptedSensor::new([
        SensorReading::light(70.0),
        SensorReading::light(20.0).with_burst(true),
    ]);

    svc.tick(&mut sensor, &clock, &mut sink);
    let report = svc.tick(&mut sensor, &clock, &mut sink);

    assert_eq!(report.speed, WiperSpeed::High);
    assert!(report.sudden_burst);
    assert!(sink.contains(&AppEvent::RainBurst { light_percent: 20.0 }));
    assert!(sink.contains(&AppEvent::SpeedChanged {
        from: WiperSpeed::Low,
        to: WiperSpeed::High
    }));
}

#[test]
fn automatic_status_omits_dew() {
    let (mut svc, clock, mut sink) = make_service(OperatingMode::Automatic);
    let mut sensor = ScriptedSensor::new([SensorReading::light(90.0).with_dew(true, 72.0)]);
    let report = svc.tick(&mut sensor, &clock, &mut sink);
    assert_eq!(report.dew_level, None);
    assert_eq!(report.light_percent, Some(90.0));
    assert_eq!(report.speed, WiperSpeed::Off);

    // The automatic sample is not carried over to the manual line.
    svc.handle_command(WiperCommand::SwitchToManual, &mut sensor, &mut sink);
    assert_eq!(svc.status(clock.now()).dew_level, None);
}

#[test]
fn sensor_failure_falls_back_and_alerts_once() {
    let (mut svc, clock, mut sink) = make_service(OperatingMode::Automatic);
    let mut sensor = ScriptedSensor::lights(&[]).then_forever(SensorReading::invalid());

    for _ in 0..5 {
        let report = svc.tick(&mut sensor, &clock, &mut sink);
        assert_eq!(report.speed, WiperSpeed::Low);
        assert_eq!(report.alert, Some(SENSOR_FAILURE_ALERT));
        clock.advance_secs(1);
    }

    let detected = sink.count(|e| matches!(e, AppEvent::FaultDetected(_)));
    assert_eq!(detected, 1, "fault edge reported once");
    assert_eq!(svc.supervisor().consecutive_failures(), 5);
}

#[test]
fn driver_recovers_from_failure_via_manual_then_auto() {
    let (mut svc, clock, mut sink) = make_service(OperatingMode::Automatic);
    let mut sensor = ScriptedSensor::new([SensorReading::invalid()]);

    svc.tick(&mut sensor, &clock, &mut sink);
    assert!(svc.supervisor().has_fault(SafetyFault::SensorFailure));

    svc.handle_command(WiperCommand::SwitchToManual, &mut sensor, &mut sink);
    svc.handle_command(WiperCommand::SelectManualSpeed(WiperSpeed::Medium), &mut sensor, &mut sink);
    let manual = svc.tick(&mut sensor, &clock, &mut sink);
    assert_eq!(manual.alert, None);
    assert_eq!(manual.speed, WiperSpeed::Medium);
    assert_eq!(sensor.reads, 1, "manual ticks do not sample");

    svc.handle_command(WiperCommand::SwitchToAutomatic, &mut sensor, &mut sink);
    assert_eq!(sensor.resets, 1);
    assert!(!svc.supervisor().has_faults());

    sensor.push(SensorReading::light(40.0));
    let auto = svc.tick(&mut sensor, &clock, &mut sink);
    assert!(auto.sensor_ok);
    assert_eq!(auto.speed, WiperSpeed::Medium);
}

#[test]
fn manual_spray_controls() {
    let (mut svc, _clock, mut sink) = make_service(OperatingMode::Manual);
    let mut sensor = ScriptedSensor::lights(&[]);

    svc.handle_command(WiperCommand::SelectManualSpeed(WiperSpeed::Low), &mut sensor, &mut sink);
    svc.handle_command(WiperCommand::ToggleSpray(SprayMode::LightSpray), &mut sensor, &mut sink);
    assert_eq!(svc.controller().spray_mode(), SprayMode::LightSpray);

    svc.handle_command(WiperCommand::ToggleSpray(SprayMode::HeavySpray), &mut sensor, &mut sink);
    assert_eq!(svc.controller().spray_mode(), SprayMode::HeavySpray);

    svc.handle_command(WiperCommand::SprayOff, &mut sensor, &mut sink);
    assert_eq!(svc.controller().spray_mode(), SprayMode::Off);
    assert_eq!(svc.controller().wiper_speed(), WiperSpeed::Low, "spray off keeps wipers");

    svc.handle_command(WiperCommand::SprayWithWiper(SprayMode::LightSpray), &mut sensor, &mut sink);
    assert_eq!(svc.controller().spray_mode(), SprayMode::LightSpray);
    assert_eq!(svc.controller().wiper_speed(), WiperSpeed::Low);

    let spray_events = sink.count(|e| matches!(e, AppEvent::SprayChanged { .. }));
    assert_eq!(spray_events, 4);
}

#[test]
fn auto_mode_ignores_manual_controls_and_keeps_sampling() {
    let (mut svc, clock, mut sink) = make_service(OperatingMode::Automatic);
    let mut sensor = ScriptedSensor::lights(&[10.0]);

    svc.handle_command(WiperCommand::SetSpeed(WiperSpeed::Off), &mut sensor, &mut sink);
    svc.handle_command(WiperCommand::SprayWithWiper(SprayMode::HeavySpray), &mut sensor, &mut sink);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CommandIgnored(_))), 2);

    let report = svc.tick(&mut sensor, &clock, &mut sink);
    assert_eq!(report.speed, WiperSpeed::High);
    assert_eq!(report.spray, SprayMode::Off);
}

#[test]
fn quit_ends_session() {
    let (mut svc, clock, mut sink) = make_service(OperatingMode::Automatic);
    let mut sensor = ScriptedSensor::lights(&[50.0]);
    svc.handle_command(WiperCommand::Quit, &mut sensor, &mut sink);
    assert!(!svc.is_running());

    sink.clear();
    svc.tick(&mut sensor, &clock, &mut sink);
    svc.handle_command(WiperCommand::SwitchToManual, &mut sensor, &mut sink);
    assert!(sink.events.is_empty());
    assert_eq!(sensor.reads, 0);
}

#[test]
fn seeded_simulator_session_is_reproducible() {
    let config = SystemConfig::default();
    let run = |seed| {
        let mut svc = WiperService::new(&config);
        let mut sink = RecordingSink::new();
        let clock = ManualClock::new();
        let mut sensor = RainSensor::seeded(&config, seed);
        svc.start(OperatingMode::Automatic, &mut sink);
        for _ in 0..50 {
            svc.tick(&mut sensor, &clock, &mut sink);
            clock.advance_secs(1);
        }
        sink.events
    };
    assert_eq!(run(7), run(7));
}
