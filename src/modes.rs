//! Closed vocabularies for wiper speed, operating mode and spray mode.
//!
//! Each enum has a stable `u8` code (the value it would carry on a wire or
//! in a register) and a fixed display string.  The `render_*_code`
//! functions degrade to `"UNKNOWN"` for codes outside the set instead of
//! failing, so a corrupted value can still be shown to the driver.

use core::fmt;

/// Placeholder shown for a code that maps to no variant.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

// ---------------------------------------------------------------------------
// Wiper speed
// ---------------------------------------------------------------------------

/// Commanded wiper speed, ordered from stopped to fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum WiperSpeed {
    #[default]
    Off = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl WiperSpeed {
    pub const ALL: [Self; 4] = [Self::Off, Self::Low, Self::Medium, Self::High];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub const fn is_running(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for WiperSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a raw speed code.
pub const fn render_speed_code(code: u8) -> &'static str {
    match WiperSpeed::from_code(code) {
        Some(speed) => speed.as_str(),
        None => UNKNOWN_LABEL,
    }
}

// ---------------------------------------------------------------------------
// Operating mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum OperatingMode {
    Manual = 0,
    #[default]
    Automatic = 1,
}

impl OperatingMode {
    pub const ALL: [Self; 2] = [Self::Manual, Self::Automatic];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Manual),
            1 => Some(Self::Automatic),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Automatic => "AUTOMATIC",
        }
    }

    /// Compact label used on the console status line.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Automatic => "AUTO",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a raw operating-mode code.
pub const fn render_mode_code(code: u8) -> &'static str {
    match OperatingMode::from_code(code) {
        Some(mode) => mode.as_str(),
        None => UNKNOWN_LABEL,
    }
}

// ---------------------------------------------------------------------------
// Spray mode
// ---------------------------------------------------------------------------

/// Washer-fluid spray intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SprayMode {
    #[default]
    Off = 0,
    LightSpray = 1,
    HeavySpray = 2,
}

impl SprayMode {
    pub const ALL: [Self; 3] = [Self::Off, Self::LightSpray, Self::HeavySpray];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::LightSpray),
            2 => Some(Self::HeavySpray),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::LightSpray => "LIGHT SPRAY",
            Self::HeavySpray => "HEAVY SPRAY",
        }
    }

    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for SprayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a raw spray code.
pub const fn render_spray_code(code: u8) -> &'static str {
    match SprayMode::from_code(code) {
        Some(spray) => spray.as_str(),
        None => UNKNOWN_LABEL,
    }
}
