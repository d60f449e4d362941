//! crates/logging-sink/src/sink.rs
//! Sink collaborator interface and the record type it consumes.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// A single log record handed to a [`LogSink`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Record<'a> {
    /// Severity of the record; higher values are more severe.
    pub level: i32,
    /// Display name of the section the record was tagged with, if any.
    pub section: Option<&'a str>,
    /// Fully formatted message text.
    pub message: &'a str,
}

impl<'a> Record<'a> {
    /// Creates a record from its parts.
    #[must_use]
    pub const fn new(level: i32, section: Option<&'a str>, message: &'a str) -> Self {
        Self {
            level,
            section,
            message,
        }
    }

    /// Renders the record as the line written to log files, without a newline.
    pub fn render(&self) -> String {
        match self.section {
            Some(section) => format!("[{section}] {}", self.message),
            None => self.message.to_owned(),
        }
    }
}

/// Destination for log records.
///
/// Startup code only needs [`add_log_file`](Self::add_log_file) and
/// [`set_repeat_limit`](Self::set_repeat_limit); the tracing layer feeds
/// records through [`record`](Self::record).
pub trait LogSink {
    /// Attaches a log file at `path`.
    ///
    /// Records below `min_level` are not written to this file; records at or
    /// above `flush_level` flush it immediately.
    fn add_log_file(&mut self, path: &Path, min_level: i32, flush_level: i32) -> io::Result<()>;

    /// Sets how many consecutive identical messages are written before the
    /// rest are suppressed. Zero disables the limit.
    fn set_repeat_limit(&mut self, limit: u32);

    /// Writes a record to every attached destination that admits it.
    fn record(&mut self, record: &Record<'_>) -> io::Result<()>;
}

impl<S> LogSink for Arc<Mutex<S>>
where
    S: LogSink + ?Sized,
{
    fn add_log_file(&mut self, path: &Path, min_level: i32, flush_level: i32) -> io::Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_log_file(path, min_level, flush_level)
    }

    fn set_repeat_limit(&mut self, limit: u32) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_repeat_limit(limit);
    }

    fn record(&mut self, record: &Record<'_>) -> io::Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(record)
    }
}
