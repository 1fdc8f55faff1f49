//! Reset-reason classification.

use core::fmt;

/// Why the controller last reset.
///
/// Wire codes match the persisted wake-journal format, so variants
/// carry explicit discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResetReason {
    /// Could not be classified.
    Unknown = 0,
    /// Power-on reset or flash upload.
    PowerOn = 1,
    /// External reset (reset button).
    External = 2,
    /// Software reset.
    Software = 3,
    /// Software panic or exception.
    Panic = 4,
    /// Interrupt watchdog.
    IntWatchdog = 5,
    /// Task watchdog.
    TaskWatchdog = 6,
    /// Other watchdog.
    Watchdog = 7,
    /// Wake from deep sleep.
    DeepSleep = 8,
    /// Brownout reset.
    Brownout = 9,
    /// Reset over SDIO.
    Sdio = 10,
}

impl ResetReason {
    /// Classify a raw reset-cause code; unrecognized codes map to
    /// [`ResetReason::Unknown`].
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => ResetReason::PowerOn,
            2 => ResetReason::External,
            3 => ResetReason::Software,
            4 => ResetReason::Panic,
            5 => ResetReason::IntWatchdog,
            6 => ResetReason::TaskWatchdog,
            7 => ResetReason::Watchdog,
            8 => ResetReason::DeepSleep,
            9 => ResetReason::Brownout,
            10 => ResetReason::Sdio,
            _ => ResetReason::Unknown,
        }
    }

    /// Short lowercase name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResetReason::Unknown => "unknown",
            ResetReason::PowerOn => "poweron",
            ResetReason::External => "external",
            ResetReason::Software => "software",
            ResetReason::Panic => "panic",
            ResetReason::IntWatchdog => "int_watchdog",
            ResetReason::TaskWatchdog => "task_watchdog",
            ResetReason::Watchdog => "watchdog",
            ResetReason::DeepSleep => "deepsleep",
            ResetReason::Brownout => "brownout",
            ResetReason::Sdio => "sdio",
        }
    }

    /// Whether this boot continues a scheduled sleep/wake cycle rather
    /// than starting fresh.
    pub const fn is_wakeup(self) -> bool {
        matches!(self, ResetReason::DeepSleep)
    }
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
