//! Sensor supervisor.
//!
//! Runs **every automatic tick before the controller** and keeps a fault
//! bitmask describing how trustworthy the sensor currently is.  It never
//! commands the wipers (the controller's own LOW fallback does that); the
//! service turns fault edges into events and the operator alert.
//!
//! ## Fault lifecycle
//!
//! 1. A reading fails classification (invalid, or valid but out of range).
//! 2. The supervisor sets the matching bit and logs it once.
//! 3. Each later reading re-evaluates every fault; a good reading clears
//!    the bits it disproves and logs the clear.
//!
//! Several faults can be active together.

use log::{error, info, warn};

use crate::error::{SafetyFault, SensorError};
use crate::sensors::SensorReading;

pub struct SensorSupervisor {
    /// Latched fault bitmask.
    faults: u8,
    /// Consecutive invalid readings (reset by any valid one).
    consecutive_failures: u32,
    total_failures: u64,
}

impl Default for SensorSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSupervisor {
    pub fn new() -> Self {
        Self {
            faults: 0,
            consecutive_failures: 0,
            total_failures: 0,
        }
    }

    /// Evaluate the latest reading.  Returns the updated fault bitmask.
    pub fn evaluate(&mut self, reading: &SensorReading) -> u8 {
        let verdict = reading.checked_light();

        match verdict {
            Err(SensorError::Failed) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.total_failures = self.total_failures.saturating_add(1);
            }
            Err(SensorError::OutOfRange) => {
                warn!(
                    "light reading {:.1}% outside 0-100 % (mapped as-is)",
                    reading.light_percent
                );
                self.consecutive_failures = 0;
            }
            Ok(_) => self.consecutive_failures = 0,
        }

        for fault in SafetyFault::ALL {
            let active = matches!(verdict, Err(e) if SafetyFault::from(e) == fault);
            self.eval_fault(fault, active);
        }

        self.faults
    }

    /// Forget all faults (sensor was reset by the operator).
    pub fn reset(&mut self) {
        if self.faults != 0 {
            info!("SENSOR FAULTS RESET: 0b{:08b}", self.faults);
        }
        self.faults = 0;
        self.consecutive_failures = 0;
    }

    /// Current fault bitmask.
    pub fn faults(&self) -> u8 {
        self.faults
    }

    /// True if **any** fault is active.
    pub fn has_faults(&self) -> bool {
        self.faults != 0
    }

    /// Check if a specific fault is active.
    pub fn has_fault(&self, fault: SafetyFault) -> bool {
        self.faults & fault.mask() != 0
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn total_failures(&self) -> u64 {
        self.total_failures
    }

    // ── Internal ──────────────────────────────────────────────────

    /// Set or clear a fault bit based on a boolean condition.
    fn eval_fault(&mut self, fault: SafetyFault, condition: bool) {
        if condition {
            if self.faults & fault.mask() == 0 {
                error!("SENSOR FAULT SET: {fault}");
            }
            self.faults |= fault.mask();
        } else {
            if self.faults & fault.mask() != 0 {
                info!("SENSOR FAULT CLEARED: {fault}");
            }
            self.faults &= !fault.mask();
        }
    }
}
