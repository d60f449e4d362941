//! crates/logging/src/output.rs
//! One-shot setup of the session log file and the section report.

use std::env;
use std::path::{Path, PathBuf};

use logging_sink::LogSink;

use crate::activation::{SectionReport, activate};
use crate::config::LogSettings;
use crate::error::LogOutputError;
use crate::levels::LEVEL_ALL;
use crate::registry::SectionRegistry;
use crate::rotation::rotate_log_file;
use crate::sections::{Profile, parse_enabled_sections};

/// File name used when none is configured.
pub const DEFAULT_LOG_FILE_NAME: &str = "infolog.txt";

/// The session's log file.
///
/// The path is resolved once, by [`initialize`](Self::initialize), from the
/// working directory (or [`set_directory`](Self::set_directory)) and the file
/// name. Changing either afterwards is a programming error and panics, as
/// does initializing twice.
#[derive(Debug)]
pub struct LogOutput {
    file_name: String,
    directory: Option<PathBuf>,
    file_path: Option<PathBuf>,
}

impl Default for LogOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl LogOutput {
    /// Log output writing [`DEFAULT_LOG_FILE_NAME`] into the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_LOG_FILE_NAME.to_owned(),
            directory: None,
            file_path: None,
        }
    }

    /// Changes the log file name. Panics after initialization.
    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        assert!(
            !self.is_initialized(),
            "log file name cannot change after initialization"
        );
        self.file_name = file_name.into();
    }

    /// Uses `directory` instead of the working directory. Panics after
    /// initialization.
    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        assert!(
            !self.is_initialized(),
            "log directory cannot change after initialization"
        );
        self.directory = Some(directory.into());
    }

    /// Configured file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Resolved path, once initialized.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.file_path.is_some()
    }

    /// Rotates the previous log if configured, then attaches the log file to
    /// `sink` at [`LEVEL_ALL`] with the configured flush level and repeat
    /// limit.
    ///
    /// # Panics
    ///
    /// Panics when called again after a successful initialization.
    pub fn initialize<S>(
        &mut self,
        settings: &LogSettings,
        sink: &mut S,
    ) -> Result<&Path, LogOutputError>
    where
        S: LogSink + ?Sized,
    {
        assert!(!self.is_initialized(), "log output already initialized");

        let directory = match &self.directory {
            Some(directory) => directory.clone(),
            None => env::current_dir().map_err(LogOutputError::CurrentDir)?,
        };
        let path = directory.join(&self.file_name);

        if settings.rotate_on_start {
            if let Some(archived) = rotate_log_file(&path) {
                tracing::debug!("previous log archived to {}", archived.display());
            }
        }

        sink.set_repeat_limit(settings.repeat_limit);
        sink.add_log_file(&path, LEVEL_ALL, settings.flush_level)
            .map_err(|source| LogOutputError::OpenLogFile {
                path: path.clone(),
                source,
            })?;

        tracing::info!("LogOutput initialized. Logging to {}", path.display());
        let path = self.file_path.insert(path);
        Ok(path.as_path())
    }
}

/// Resolves the enabled sections, applies them to `registry` and logs the
/// resulting report.
///
/// Sections come from `settings.sections`, `env_override` (normally
/// [`env_sections`](crate::env_sections)) and the profile's forced list.
pub fn log_section_info(
    registry: &SectionRegistry,
    settings: &LogSettings,
    env_override: Option<&str>,
    profile: Profile,
) -> SectionReport {
    let requested = parse_enabled_sections(&settings.sections, env_override, profile);
    let report = activate(&requested, registry);

    for line in report.lines() {
        tracing::info!("{line}");
    }
    report
}
