#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` configures infolog's diagnostic logging at process start. It
//! decides which named log sections are active and at which minimum level,
//! moves the previous session's log file out of the way, attaches the new
//! log file to a [`logging_sink::LogSink`], and produces the startup banners.
//!
//! # Design
//!
//! - [`SectionRegistry`] holds the sections the program declared, each
//!   disabled until activated.
//! - [`parse_enabled_sections`] merges the configured list, the
//!   [`SECTIONS_ENV`] override and the [`Profile`]'s forced sections into a
//!   [`SectionLevelMap`].
//! - [`activate`] snaps the requested levels onto [`KNOWN_LEVELS`] and
//!   applies them, returning a [`SectionReport`].
//! - [`LogOutput`] resolves the log path, rotates via [`rotate_log_file`],
//!   and attaches the file to the sink.
//! - [`SectionLayer`] lets `tracing` call sites log to sections.
//!
//! # Invariants
//!
//! - Activation is idempotent: the same inputs always produce the same
//!   section levels.
//! - A section requested at [`LEVEL_NONE`] or above, or below
//!   [`Level::Debug`], stays disabled.
//! - Rotation never overwrites an existing archive and never aborts startup.
//!
//! # Errors
//!
//! Malformed section levels fall back to the profile default. Rotation
//! failures are reported on standard error. Only attaching the log file
//! returns an error ([`LogOutputError`]); misuse of [`LogOutput`] panics.
//!
//! # Examples
//!
//! ```
//! use logging::{Level, Profile, SectionRegistry, activate, parse_enabled_sections};
//!
//! let registry = SectionRegistry::with_sections(["Sound", "VFS", "Net"]);
//! let requested = parse_enabled_sections("net:45", None, Profile::Release);
//! let report = activate(&requested, &registry);
//!
//! assert_eq!(report.level_of("sound"), Some(Level::Notice));
//! assert_eq!(report.level_of("net"), Some(Level::Warning));
//! assert!(registry.is_enabled("vfs", Level::Info.as_i32()));
//! ```

mod activation;
mod banners;
mod config;
mod error;
mod levels;
mod output;
mod registry;
mod rotation;
mod sections;
mod tracing_bridge;
mod tracing_macros;

pub use activation::{SectionReport, activate};
pub use banners::{
    SystemInfo, VERSION, config_banner, exception_line, log_config_info, log_exception_info,
    log_system_info, system_banner, version_line,
};
pub use config::LogSettings;
pub use error::LogOutputError;
pub use levels::{KNOWN_LEVELS, LEVEL_ALL, LEVEL_NONE, Level, level_name, nearest_known_level};
pub use output::{DEFAULT_LOG_FILE_NAME, LogOutput, log_section_info};
pub use registry::{Section, SectionRegistry};
pub use rotation::{ARCHIVE_DIR_NAME, archive_dir, rotate_log_file};
pub use sections::{
    Profile, ProfileParseError, SECTIONS_ENV, SectionLevelMap, env_sections,
    parse_enabled_sections,
};
pub use tracing_bridge::{SectionLayer, init_tracing};
