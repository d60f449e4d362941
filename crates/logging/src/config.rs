//! crates/logging/src/config.rs
//! Configuration values consumed by the logging subsystem.

use crate::levels::Level;

/// Settings read once during log initialization and section activation.
///
/// With the `serde` feature every field is optional when deserializing;
/// missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogSettings {
    /// Move an existing log file into the `log` subdirectory on start.
    pub rotate_on_start: bool,
    /// Comma-separated `section[:level]` list of enabled sections.
    pub sections: String,
    /// Flush the log file when a record's level reaches this value.
    pub flush_level: i32,
    /// Allow at most this many consecutive identical messages; 0 disables.
    pub repeat_limit: u32,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            rotate_on_start: false,
            sections: String::new(),
            flush_level: Level::Error.as_i32(),
            repeat_limit: 0,
        }
    }
}

impl LogSettings {
    /// Key/value pairs of the settings that differ from their defaults.
    #[must_use]
    pub fn non_default_entries(&self) -> Vec<(&'static str, String)> {
        let defaults = Self::default();
        let mut entries = Vec::new();

        if self.rotate_on_start != defaults.rotate_on_start {
            entries.push(("rotate_on_start", self.rotate_on_start.to_string()));
        }
        if self.sections != defaults.sections {
            entries.push(("sections", self.sections.clone()));
        }
        if self.flush_level != defaults.flush_level {
            entries.push(("flush_level", self.flush_level.to_string()));
        }
        if self.repeat_limit != defaults.repeat_limit {
            entries.push(("repeat_limit", self.repeat_limit.to_string()));
        }

        entries
    }
}
