//! crates/logging/src/levels.rs
//! Known severity levels and snapping of requested levels onto them.

use std::fmt;

/// Floor meaning "log everything"; below every known level.
pub const LEVEL_ALL: i32 = 0;

/// Sentinel meaning "never log". Sections at this level are disabled.
pub const LEVEL_NONE: i32 = 255;

/// A severity level known to the logging subsystem.
///
/// Lower values are more verbose. The discriminants are the numeric
/// thresholds compared against section minimum levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum Level {
    /// Diagnostics only useful while developing.
    Debug = 20,
    /// Normal operational messages.
    Info = 30,
    /// Noteworthy but expected conditions.
    Notice = 35,
    /// Use of a feature scheduled for removal.
    Deprecated = 37,
    /// Something unexpected that the program recovered from.
    Warning = 40,
    /// An operation failed.
    Error = 50,
    /// The program cannot continue.
    Fatal = 60,
}

/// All known levels in ascending order.
pub const KNOWN_LEVELS: [Level; 7] = [
    Level::Debug,
    Level::Info,
    Level::Notice,
    Level::Deprecated,
    Level::Warning,
    Level::Error,
    Level::Fatal,
];

impl Level {
    /// Numeric threshold of the level.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Upper-case display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Deprecated => "DEPRECATED",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns the known level with exactly this threshold.
    #[must_use]
    pub fn from_i32(value: i32) -> Option<Self> {
        KNOWN_LEVELS.into_iter().find(|level| level.as_i32() == value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snaps `requested` down to the highest known level not above it.
///
/// Returns `None` when `requested` is below [`Level::Debug`]; callers treat
/// that as "do not enable". Values at or above [`Level::Fatal`] snap to
/// `Fatal`, including [`LEVEL_NONE`]; rejecting the sentinel is the caller's
/// decision.
#[must_use]
pub fn nearest_known_level(requested: i32) -> Option<Level> {
    KNOWN_LEVELS
        .into_iter()
        .rev()
        .find(|level| level.as_i32() <= requested)
}

/// Renders a numeric level as text.
#[must_use]
pub fn level_name(level: i32) -> &'static str {
    match level {
        LEVEL_ALL => "ALL",
        LEVEL_NONE => "NONE",
        other => Level::from_i32(other).map_or("UNKNOWN", Level::name),
    }
}
