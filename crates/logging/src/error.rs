//! crates/logging/src/error.rs
//! Errors surfaced by log output initialization.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to bring up the log file.
#[derive(Debug, Error)]
pub enum LogOutputError {
    /// The working directory the log file lives in could not be resolved.
    #[error("failed to determine the working directory: {0}")]
    CurrentDir(#[source] io::Error),
    /// The sink could not open the log file.
    #[error("failed to open log file '{}': {source}", path.display())]
    OpenLogFile {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
