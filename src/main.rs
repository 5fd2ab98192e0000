//! RainWiper console: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  RainSensor     ConsoleSink + LogEventSink   JsonConfigFile  │
//! │  (SensorPort)   (EventSink)                  (ConfigPort)    │
//! │  MonotonicClock (Clock)                                      │
//! │                                                              │
//! │  ────────────── Port Trait Boundary ──────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            WiperService (pure logic)                   │  │
//! │  │  SensorSupervisor · WiperController                    │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  Cadence (sample pacing) · key polling                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::style::Color;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use rainwiper::adapters::config_file::JsonConfigFile;
use rainwiper::adapters::console::{
    ConsoleInput, ConsoleSink, KeyMap, MODE_PROMPT, SPEED_PROMPT, parse_mode_choice,
};
use rainwiper::adapters::log_sink::LogEventSink;
use rainwiper::adapters::time::MonotonicClock;
use rainwiper::app::commands::WiperCommand;
use rainwiper::app::events::AppEvent;
use rainwiper::app::ports::{Clock, ConfigPort, EventSink};
use rainwiper::app::service::WiperService;
use rainwiper::modes::OperatingMode;
use rainwiper::scheduler::Cadence;
use rainwiper::sensors::RainSensor;

// ── CLI ───────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rainwiper", version, about = "Rain-sensing windshield wiper simulator")]
struct Cli {
    /// JSON configuration file (defaults are used when it does not exist)
    #[arg(long, default_value = "rainwiper.json")]
    config: PathBuf,

    /// Start in this mode instead of asking
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Seed for the simulated sensor (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the per-read sensor failure probability (0-1)
    #[arg(long)]
    failure_probability: Option<f64>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Manual,
    Auto,
}

impl From<ModeArg> for OperatingMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Manual => Self::Manual,
            ModeArg::Auto => Self::Automatic,
        }
    }
}

// ── Logging ───────────────────────────────────────────────────
//
// `log` records from the library reach the subscriber through its
// tracing-log bridge.  Priority: RAINWIPER_LOG > RUST_LOG > -v/-q > warn.

fn build_env_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if let Ok(directives) = std::env::var("RAINWIPER_LOG") {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if verbose {
        LevelFilter::DEBUG
    } else if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::WARN
    };
    EnvFilter::default().add_directive(level.into())
}

/// stderr with `\n` widened to `\r\n`; the terminal is in raw mode.
struct CrlfWriter<W: Write>(W);

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (i, line) in buf.split(|&b| b == b'\n').enumerate() {
            if i > 0 {
                self.0.write_all(b"\r\n")?;
            }
            self.0.write_all(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

fn init_logging(cli: &Cli) {
    let use_ansi = !cli.no_color && io::stderr().is_terminal();
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(cli.verbose, cli.quiet))
        .with_writer(|| CrlfWriter(io::stderr()))
        .with_ansi(use_ansi)
        .with_target(true)
        .without_time()
        .compact()
        .init();
}

// ── Terminal ──────────────────────────────────────────────────

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw terminal mode")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Console status line plus structured log, fed from one event stream.
struct SessionSink<W: Write> {
    console: ConsoleSink<W>,
    log: LogEventSink,
}

impl<W: Write> EventSink for SessionSink<W> {
    fn emit(&mut self, event: &AppEvent) {
        self.log.emit(event);
        self.console.emit(event);
    }
}

/// Block until the driver picks a mode.  `None` means quit.
fn prompt_mode(console: &mut ConsoleSink<impl Write>) -> Result<Option<OperatingMode>> {
    console.line(MODE_PROMPT, Some(Color::Cyan));
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(mode) = parse_mode_choice(&key) {
                return Ok(Some(mode));
            }
            let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if matches!(key.code, KeyCode::Char('q' | 'Q')) || ctrl_c {
                return Ok(None);
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let store = JsonConfigFile::new(&cli.config);
    let mut config = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;
    if let Some(p) = cli.failure_probability {
        config.sensor_failure_probability = p;
        config.validate().context("--failure-probability")?;
    }
    info!("config: {:?}", config);

    let mut sensor = match cli.seed {
        Some(seed) => RainSensor::seeded(&config, seed),
        None => RainSensor::new(&config),
    };
    let clock = MonotonicClock::new();
    let color = !cli.no_color && io::stdout().is_terminal();

    let _guard = TerminalGuard::enter()?;
    let mut sink = SessionSink {
        console: ConsoleSink::new(io::stdout(), color, clock.started_at()),
        log: LogEventSink::new(),
    };
    sink.console.help();

    let mode = match cli.mode {
        Some(m) => OperatingMode::from(m),
        None => match prompt_mode(&mut sink.console)? {
            Some(m) => m,
            None => return Ok(()),
        },
    };

    let mut service = WiperService::new(&config);
    let mut keys = KeyMap::new();
    service.start(mode, &mut sink);
    if mode == OperatingMode::Manual {
        keys.expect_speed();
        sink.console.line(SPEED_PROMPT, Some(Color::Cyan));
    }

    let mut cadence = Cadence::new(config.sample_interval());
    let poll = config.input_poll_interval();

    while service.is_running() {
        // Wake for the next sample even if no key arrives.
        let wait = poll.min(cadence.time_until_due(clock.now()));
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                match keys.translate(&key) {
                    Some(ConsoleInput::Help) => sink.console.help(),
                    Some(ConsoleInput::Command(cmd)) => {
                        service.handle_command(cmd, &mut sensor, &mut sink);
                        if cmd == WiperCommand::SwitchToManual {
                            sink.console.line(SPEED_PROMPT, Some(Color::Cyan));
                        }
                    }
                    None => {}
                }
            }
        }

        let now = clock.now();
        if service.is_running() && cadence.due(now) {
            service.tick(&mut sensor, &clock, &mut sink);
            cadence.reset(now);
        }
    }

    info!(
        "session ended after {} ticks ({}s, {} sensor reads)",
        service.tick_count(),
        clock.uptime_secs(),
        sensor.total_reads()
    );
    Ok(())
}
