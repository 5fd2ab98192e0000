//! Mock adapters for integration tests.
//!
//! A scripted sensor, a hand-driven clock and a sink that records every
//! event, so tests can assert on the full session history without a
//! terminal or real time passing.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rainwiper::app::events::{AppEvent, StatusReport};
use rainwiper::app::ports::{Clock, ConfigPort, EventSink, SensorPort};
use rainwiper::config::SystemConfig;
use rainwiper::error::ConfigError;
use rainwiper::sensors::SensorReading;

// ── ScriptedSensor ────────────────────────────────────────────

/// Replays a fixed list of readings, then repeats `fallback` forever.
pub struct ScriptedSensor {
    script: VecDeque<SensorReading>,
    fallback: SensorReading,
    pub reads: u32,
    pub resets: u32,
}

#[allow(dead_code)]
impl ScriptedSensor {
    pub fn new(script: impl IntoIterator<Item = SensorReading>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: SensorReading::light(95.0),
            reads: 0,
            resets: 0,
        }
    }

    /// Plain valid readings at the given light levels.
    pub fn lights(lights: &[f64]) -> Self {
        Self::new(lights.iter().map(|&l| SensorReading::light(l)))
    }

    pub fn then_forever(mut self, reading: SensorReading) -> Self {
        self.fallback = reading;
        self
    }

    pub fn push(&mut self, reading: SensorReading) {
        self.script.push_back(reading);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SensorPort for ScriptedSensor {
    fn read(&mut self) -> SensorReading {
        self.reads += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }

    fn reset_failure(&mut self) {
        self.resets += 1;
    }
}

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock {
    now: Cell<Instant>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn statuses(&self) -> Vec<StatusReport> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Status(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MemoryConfig ──────────────────────────────────────────────

/// In-memory [`ConfigPort`] with the same validation contract as the file adapter.
#[derive(Default)]
pub struct MemoryConfig {
    stored: RefCell<Option<SystemConfig>>,
}

impl ConfigPort for MemoryConfig {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        Ok(self.stored.borrow().clone().unwrap_or_default())
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        config.validate()?;
        *self.stored.borrow_mut() = Some(config.clone());
        Ok(())
    }
}
