//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade (stderr via the subscriber the binary installs).  The
//! console adapter implements the same trait for the status line.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::modes::{render_speed_code, render_spray_code};

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => {
                info!(
                    "STATUS | mode={} | light={} | wiper={} | spray={} | burst={} | \
                     dew={} | off_in={} | sensor={}",
                    s.mode,
                    s.light_percent.map_or_else(|| "-".into(), |l| format!("{l:.1}%")),
                    render_speed_code(s.speed.code()),
                    render_spray_code(s.spray.code()),
                    s.sudden_burst,
                    s.dew_level.map_or_else(|| "-".into(), |d| format!("{d:.1}%")),
                    s.turn_off_remaining_secs.map_or_else(|| "-".into(), |r| format!("{r}s")),
                    if s.sensor_ok { "OK" } else { "FAILED" },
                );
            }
            AppEvent::Started(mode) => info!("START | mode={}", mode),
            AppEvent::Stopped => info!("STOP"),
            AppEvent::ModeChanged { from, to } => info!("MODE | {} -> {}", from, to),
            AppEvent::SpeedChanged { from, to } => info!("WIPER | {} -> {}", from, to),
            AppEvent::SprayChanged { from, to } => info!("SPRAY | {} -> {}", from, to),
            AppEvent::TurnOffArmed { delay_secs } => {
                info!("WIPER | turn-off armed, {}s", delay_secs);
            }
            AppEvent::TurnOffCancelled => info!("WIPER | turn-off cancelled"),
            AppEvent::RainBurst { light_percent } => {
                info!("RAIN | sudden burst at {:.1}%", light_percent);
            }
            AppEvent::FaultDetected(flags) => info!("FAULT | detected, flags=0b{:08b}", flags),
            AppEvent::FaultCleared => info!("FAULT | all cleared"),
            AppEvent::CommandIgnored(cmd) => info!("CMD | {} ignored", cmd),
        }
    }
}
