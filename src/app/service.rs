//! Application service: the hexagonal core.
//!
//! [`WiperService`] owns the wiper controller and the sensor supervisor.
//! It exposes a terminal-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the entire session testable with mock
//! adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │      WiperService        │
//!       Clock ──▶ │ Supervisor · Controller  │
//!                 └──────────────────────────┘
//! ```

use std::time::Instant;

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::{Decision, WiperController};
use crate::error::SafetyFault;
use crate::modes::{OperatingMode, SprayMode, WiperSpeed};
use crate::safety::SensorSupervisor;
use crate::sensors::SensorReading;

use super::commands::WiperCommand;
use super::events::{AppEvent, SENSOR_FAILURE_ALERT, StatusReport};
use super::ports::{Clock, EventSink, SensorPort};

/// Mode, speed and spray at one instant; diffed to emit change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Settings {
    mode: OperatingMode,
    speed: WiperSpeed,
    spray: SprayMode,
}

// ───────────────────────────────────────────────────────────────
// WiperService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates one driving session.
pub struct WiperService {
    controller: WiperController,
    supervisor: SensorSupervisor,
    /// Last sample; cleared on every mode switch.
    last_reading: Option<SensorReading>,
    running: bool,
    tick_count: u64,
}

impl WiperService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the session; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            controller: WiperController::with_config(config),
            supervisor: SensorSupervisor::new(),
            last_reading: None,
            running: false,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the session in `mode`.
    pub fn start(&mut self, mode: OperatingMode, sink: &mut impl EventSink) {
        self.controller.set_operating_mode(mode);
        self.running = true;
        sink.emit(&AppEvent::Started(mode));
        info!("WiperService started in {mode} mode");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one sample cycle: read sensor → supervisor → controller → status.
    ///
    /// In manual mode the sensor is not read and only a status snapshot is
    /// emitted.
    pub fn tick(
        &mut self,
        sensor: &mut impl SensorPort,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> StatusReport {
        let now = clock.now();
        if !self.running {
            return self.status(now);
        }
        self.tick_count += 1;

        if self.controller.operating_mode() == OperatingMode::Automatic {
            self.automatic_step(sensor, now, sink);
        }

        let report = self.status(now);
        sink.emit(&AppEvent::Status(report));
        report
    }

    fn automatic_step(&mut self, sensor: &mut impl SensorPort, now: Instant, sink: &mut impl EventSink) {
        // 1. Sample
        let reading = sensor.read();
        self.last_reading = Some(reading);

        // 2. Supervisor (fault edges only)
        let faults_before = self.supervisor.faults();
        let faults = self.supervisor.evaluate(&reading);
        let raised = faults & !faults_before;
        if raised != 0 {
            warn!("Sensor fault! flags=0b{:08b}", faults);
            sink.emit(&AppEvent::FaultDetected(raised));
        } else if faults_before != 0 && faults == 0 {
            sink.emit(&AppEvent::FaultCleared);
        }

        // 3. Decision step
        let before = self.settings();
        let was_pending = self.controller.is_turn_off_pending();
        let decision = self.controller.process_sample(&reading, now);

        match decision {
            Decision::BurstOverride => sink.emit(&AppEvent::RainBurst {
                light_percent: reading.light_percent,
            }),
            Decision::TurnOffArmed => sink.emit(&AppEvent::TurnOffArmed {
                delay_secs: self.controller.turn_off_delay().as_secs(),
            }),
            _ => {}
        }
        if was_pending && !self.controller.is_turn_off_pending() && decision != Decision::TurnedOff {
            sink.emit(&AppEvent::TurnOffCancelled);
        }

        // 4. Speed changes
        self.emit_transitions(before, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a driver command.  The sensor is needed to reset a latched
    /// failure when automatic mode is re-engaged.
    pub fn handle_command(
        &mut self,
        cmd: WiperCommand,
        sensor: &mut impl SensorPort,
        sink: &mut impl EventSink,
    ) {
        if !self.running {
            debug!("command {} after stop, dropped", cmd.label());
            return;
        }
        if cmd.is_manual_only() && self.controller.operating_mode() == OperatingMode::Automatic {
            debug!("command {} ignored in automatic mode", cmd.label());
            sink.emit(&AppEvent::CommandIgnored(cmd.label()));
            return;
        }

        let before = self.settings();
        match cmd {
            WiperCommand::SwitchToManual => {
                self.controller.set_operating_mode(OperatingMode::Manual);
                self.last_reading = None;
            }
            WiperCommand::SwitchToAutomatic => {
                self.controller.set_operating_mode(OperatingMode::Automatic);
                self.controller.set_spray_mode(SprayMode::Off);
                sensor.reset_failure();
                self.supervisor.reset();
                self.last_reading = None;
            }
            WiperCommand::SelectManualSpeed(speed) => {
                self.controller.set_wiper_speed(speed);
                self.controller.set_spray_mode(SprayMode::Off);
            }
            WiperCommand::SetSpeed(speed) => {
                self.controller.set_wiper_speed(speed);
                if speed == WiperSpeed::Off {
                    self.controller.set_spray_mode(SprayMode::Off);
                }
            }
            WiperCommand::ToggleSpray(spray) => {
                let next = if self.controller.spray_mode() == spray {
                    SprayMode::Off
                } else {
                    spray
                };
                self.controller.set_spray_mode(next);
            }
            WiperCommand::SprayOff => self.controller.set_spray_mode(SprayMode::Off),
            WiperCommand::SprayWithWiper(spray) => self.controller.activate_spray_with_wiper(spray),
            WiperCommand::Quit => {
                self.running = false;
                info!("WiperService stopping after {} ticks", self.tick_count);
                sink.emit(&AppEvent::Stopped);
                return;
            }
        }
        self.emit_transitions(before, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot at `now`.
    pub fn status(&self, now: Instant) -> StatusReport {
        let automatic = self.controller.operating_mode() == OperatingMode::Automatic;
        let reading = self.last_reading.filter(|_| automatic);
        let valid = reading.filter(|r| r.valid);

        StatusReport {
            mode: self.controller.operating_mode(),
            speed: self.controller.wiper_speed(),
            spray: self.controller.spray_mode(),
            light_percent: valid.map(|r| r.light_percent),
            sensor_ok: reading.is_none_or(|r| r.valid),
            sudden_burst: valid.is_some_and(|r| r.sudden_burst),
            // Dew belongs to the manual line; automatic shows rain only.
            dew_level: self
                .last_reading
                .filter(|r| !automatic && r.valid && r.dew_present)
                .map(|r| r.dew_level),
            turn_off_remaining_secs: self
                .controller
                .pending_turn_off()
                .filter(|_| automatic)
                .map(|p| p.remaining_secs(now)),
            alert: (automatic && self.supervisor.has_fault(SafetyFault::SensorFailure))
                .then_some(SENSOR_FAILURE_ALERT),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn controller(&self) -> &WiperController {
        &self.controller
    }

    pub fn supervisor(&self) -> &SensorSupervisor {
        &self.supervisor
    }

    /// Sample cycles executed since start.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn settings(&self) -> Settings {
        Settings {
            mode: self.controller.operating_mode(),
            speed: self.controller.wiper_speed(),
            spray: self.controller.spray_mode(),
        }
    }

    fn emit_transitions(&self, before: Settings, sink: &mut impl EventSink) {
        let after = self.settings();
        if before.mode != after.mode {
            info!("mode {} -> {}", before.mode, after.mode);
            sink.emit(&AppEvent::ModeChanged {
                from: before.mode,
                to: after.mode,
            });
        }
        if before.speed != after.speed {
            sink.emit(&AppEvent::SpeedChanged {
                from: before.speed,
                to: after.speed,
            });
        }
        if before.spray != after.spray {
            info!("spray {} -> {}", before.spray, after.spray);
            sink.emit(&AppEvent::SprayChanged {
                from: before.spray,
                to: after.spray,
            });
        }
    }
}
