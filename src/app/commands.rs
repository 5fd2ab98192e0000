//! Inbound commands to the application service.
//!
//! These represent actions requested by the driver (console keys today)
//! that the [`WiperService`](super::service::WiperService) interprets and
//! acts upon.

use crate::modes::{SprayMode, WiperSpeed};

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiperCommand {
    /// Enter manual mode.  Speed and spray are kept.
    SwitchToManual,

    /// Enter automatic mode.  Clears spray and resets a failed sensor.
    SwitchToAutomatic,

    /// Initial speed choice after entering manual mode.  Clears spray.
    SelectManualSpeed(WiperSpeed),

    /// Manual only.  OFF also clears spray; other speeds keep it.
    SetSpeed(WiperSpeed),

    /// Manual only.  The same spray again turns spray off.
    ToggleSpray(SprayMode),

    /// Manual only.  Spray off, wipers untouched.
    SprayOff,

    /// Manual only.  Spray and run the wipers at the coupled speed.
    SprayWithWiper(SprayMode),

    /// End the session.
    Quit,
}

impl WiperCommand {
    /// Commands that only make sense while the driver is in control.
    pub const fn is_manual_only(self) -> bool {
        matches!(
            self,
            Self::SetSpeed(_) | Self::ToggleSpray(_) | Self::SprayOff | Self::SprayWithWiper(_)
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SwitchToManual => "switch-to-manual",
            Self::SwitchToAutomatic => "switch-to-automatic",
            Self::SelectManualSpeed(_) => "select-manual-speed",
            Self::SetSpeed(_) => "set-speed",
            Self::ToggleSpray(_) => "toggle-spray",
            Self::SprayOff => "spray-off",
            Self::SprayWithWiper(_) => "spray-with-wiper",
            Self::Quit => "quit",
        }
    }
}
