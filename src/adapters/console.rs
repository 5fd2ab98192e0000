//! Terminal console adapter.
//!
//! Translates key presses into [`WiperCommand`]s and paints the status
//! line.  Raw mode is active while the session runs, so every line ends in
//! `\r\n`.
//!
//! ```text
//!  [00:00:12] Mode: AUTO | Sensor: 42% | Wiper: LOW (Turning OFF in 7s)
//! ```

use core::time::Duration;
use std::io::{self, Write};
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::app::commands::WiperCommand;
use crate::app::events::{AppEvent, StatusReport};
use crate::app::ports::EventSink;
use crate::modes::{OperatingMode, SprayMode, WiperSpeed};

pub const HELP: &[&str] = &[
    "=== Rain-Sensing Wiper System ===",
    "  m / M - switch to manual mode (then 0-3 picks a speed)",
    "  a / A - switch to automatic mode",
    "  q / Q - quit",
    "Manual mode only:",
    "  0 / 1 / 2 / 3 - OFF / LOW / MEDIUM / HIGH",
    "  s / S - toggle light / heavy spray",
    "  x / X - spray off",
    "  w / W - light / heavy spray with wipers (dew clearing)",
    "  h - this help",
];

pub const MODE_PROMPT: &str = "Select operating mode: [m]anual or [a]utomatic";
pub const SPEED_PROMPT: &str = "Select wiper speed: 0 OFF, 1 LOW, 2 MEDIUM, 3 HIGH";

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(WiperCommand),
    Help,
}

// ───────────────────────────────────────────────────────────────
// Key mapping
// ───────────────────────────────────────────────────────────────

/// Stateful key translator.  After `m` the next digit is the initial
/// manual speed rather than a plain speed change.
#[derive(Debug, Default)]
pub struct KeyMap {
    awaiting_speed: bool,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the manual speed prompt is open.
    pub fn awaiting_speed(&self) -> bool {
        self.awaiting_speed
    }

    /// Open the speed prompt (session started straight into manual mode).
    pub fn expect_speed(&mut self) {
        self.awaiting_speed = true;
    }

    pub fn translate(&mut self, key: &KeyEvent) -> Option<ConsoleInput> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(ConsoleInput::Command(WiperCommand::Quit));
        }
        let KeyCode::Char(ch) = key.code else {
            return None;
        };

        if let Some(speed) = digit_speed(ch) {
            let cmd = if self.awaiting_speed {
                self.awaiting_speed = false;
                WiperCommand::SelectManualSpeed(speed)
            } else {
                WiperCommand::SetSpeed(speed)
            };
            return Some(ConsoleInput::Command(cmd));
        }

        let cmd = match ch {
            'h' | '?' => return Some(ConsoleInput::Help),
            'm' | 'M' => {
                self.awaiting_speed = true;
                WiperCommand::SwitchToManual
            }
            'a' | 'A' => {
                self.awaiting_speed = false;
                WiperCommand::SwitchToAutomatic
            }
            'q' | 'Q' => WiperCommand::Quit,
            's' => WiperCommand::ToggleSpray(SprayMode::LightSpray),
            'S' => WiperCommand::ToggleSpray(SprayMode::HeavySpray),
            'x' | 'X' => WiperCommand::SprayOff,
            'w' => WiperCommand::SprayWithWiper(SprayMode::LightSpray),
            'W' => WiperCommand::SprayWithWiper(SprayMode::HeavySpray),
            _ => return None,
        };
        Some(ConsoleInput::Command(cmd))
    }
}

fn digit_speed(ch: char) -> Option<WiperSpeed> {
    ch.to_digit(10).and_then(|d| WiperSpeed::from_code(d as u8))
}

/// Answer to the start-up mode prompt.
pub fn parse_mode_choice(key: &KeyEvent) -> Option<OperatingMode> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('m' | 'M' | '1') => Some(OperatingMode::Manual),
        KeyCode::Char('a' | 'A' | '2') => Some(OperatingMode::Automatic),
        _ => None,
    }
}

// ───────────────────────────────────────────────────────────────
// Status line
// ───────────────────────────────────────────────────────────────

/// A piece of the status line and its colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub color: Option<Color>,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

pub const fn speed_color(speed: WiperSpeed) -> Color {
    match speed {
        WiperSpeed::Off => Color::Grey,
        WiperSpeed::Low => Color::Green,
        WiperSpeed::Medium => Color::Yellow,
        WiperSpeed::High => Color::Red,
    }
}

pub const fn mode_color(mode: OperatingMode) -> Color {
    match mode {
        OperatingMode::Automatic => Color::Green,
        OperatingMode::Manual => Color::Blue,
    }
}

const fn spray_color(spray: SprayMode) -> Color {
    match spray {
        SprayMode::HeavySpray => Color::Blue,
        SprayMode::Off | SprayMode::LightSpray => Color::Cyan,
    }
}

/// `HH:MM:SS` of session uptime.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

pub fn status_segments(report: &StatusReport, uptime: Duration) -> Vec<Segment> {
    let mut out = vec![
        Segment::plain(format!("[{}] Mode: ", format_uptime(uptime))),
        Segment::colored(report.mode.short_label(), mode_color(report.mode)),
    ];

    if report.mode == OperatingMode::Automatic {
        out.push(Segment::plain(" | Sensor: "));
        out.push(match report.light_percent {
            Some(light) if report.sensor_ok => Segment::plain(format!("{light:.0}%")),
            _ if !report.sensor_ok => Segment::colored("ERROR", Color::Red),
            _ => Segment::plain("--"),
        });
    }

    out.push(Segment::plain(" | Wiper: "));
    out.push(Segment::colored(report.speed.as_str(), speed_color(report.speed)));

    if report.spray.is_active() {
        out.push(Segment::plain(" | Spray: "));
        out.push(Segment::colored(report.spray.as_str(), spray_color(report.spray)));
    }
    if report.sudden_burst {
        out.push(Segment::colored(" (Sudden Rain Burst)", Color::Red));
    }
    if let Some(remaining) = report.turn_off_remaining_secs {
        out.push(Segment::colored(
            format!(" (Turning OFF in {remaining}s)"),
            Color::Yellow,
        ));
    }
    if let Some(dew) = report.dew_level.filter(|_| report.mode == OperatingMode::Manual) {
        out.push(Segment::colored(format!(" (Dew Detected: {dew:.0}%)"), Color::Magenta));
    }
    if let Some(alert) = report.alert {
        out.push(Segment::colored(format!(" ({alert})"), Color::Red));
    }
    out
}

/// Status line without colour codes.
pub fn format_status(report: &StatusReport, uptime: Duration) -> String {
    status_segments(report, uptime)
        .into_iter()
        .map(|s| s.text)
        .collect()
}

/// Write one raw-mode line (`\r\n` terminated), coloured or not.
pub fn write_segments(out: &mut impl Write, segments: &[Segment], color: bool) -> io::Result<()> {
    for seg in segments {
        match seg.color {
            Some(c) if color => {
                queue!(out, SetForegroundColor(c), Print(&seg.text), ResetColor)?;
            }
            _ => queue!(out, Print(&seg.text))?,
        }
    }
    queue!(out, Print("\r\n"))?;
    out.flush()
}

pub fn write_line(out: &mut impl Write, text: &str, color: Option<Color>) -> io::Result<()> {
    let seg = match color {
        Some(c) => Segment::colored(text, c),
        None => Segment::plain(text),
    };
    write_segments(out, &[seg], color.is_some())
}

// ───────────────────────────────────────────────────────────────
// Console sink
// ───────────────────────────────────────────────────────────────

/// Paints status snapshots and notable events on a terminal.
pub struct ConsoleSink<W: Write> {
    out: W,
    color: bool,
    started: Instant,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, color: bool, started: Instant) -> Self {
        Self {
            out,
            color,
            started,
        }
    }

    pub fn line(&mut self, text: &str, color: Option<Color>) {
        let color = color.filter(|_| self.color);
        if let Err(e) = write_line(&mut self.out, text, color) {
            log::warn!("console write failed: {e}");
        }
    }

    pub fn help(&mut self) {
        for line in HELP {
            self.line(line, Some(Color::Cyan));
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(report) => {
                let segments = status_segments(report, self.started.elapsed());
                if let Err(e) = write_segments(&mut self.out, &segments, self.color) {
                    log::warn!("console write failed: {e}");
                }
            }
            AppEvent::ModeChanged { to, .. } => {
                self.line(&format!("Switched to {to} mode"), Some(mode_color(*to)));
            }
            AppEvent::CommandIgnored(_) => {
                self.line("Speed and spray controls need manual mode (press m)", Some(Color::Yellow));
            }
            AppEvent::Stopped => self.line("Wiper system stopped.", None),
            _ => {}
        }
    }
}
