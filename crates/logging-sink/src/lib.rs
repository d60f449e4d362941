#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` is the output half of infolog's logging subsystem. It owns
//! the files log records end up in and knows nothing about sections, level
//! names, or configuration sources: levels arrive as plain integers where a
//! higher value means a more severe record.
//!
//! # Design
//!
//! [`LogSink`] is the collaborator interface the startup code programs
//! against: attach a log file with a level floor and flush threshold, set the
//! global repeat limit, and write [`Record`]s. [`FileSink`] is the file-backed
//! implementation. Every attached file shares one [`RepeatFilter`], so a
//! message suppressed as a repeat is suppressed on all files at once.
//!
//! # Invariants
//!
//! - A record reaches a file only when its level is at or above the file's
//!   floor.
//! - A file is flushed after any record whose level is at or above its flush
//!   threshold.
//! - A repeat limit of zero disables repeat suppression.
//! - A "Last message repeated N times" line goes to the files that accepted
//!   the repeated message. Records no file accepts leave the repeat state
//!   untouched.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values from opening or writing
//! the underlying files.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{FileSink, LogSink, Record};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("infolog.txt");
//!
//! let mut sink = FileSink::new();
//! sink.add_log_file(&path, 0, 50)?;
//! sink.record(&Record::new(30, Some("Sound"), "mixer ready"))?;
//! sink.flush()?;
//!
//! let text = std::fs::read_to_string(&path)?;
//! assert_eq!(text, "[Sound] mixer ready\n");
//! # Ok::<(), std::io::Error>(())
//! ```

mod file;
mod repeat;
mod sink;

pub use file::FileSink;
pub use repeat::{RepeatFilter, RepeatVerdict};
pub use sink::{LogSink, Record};
