//! crates/logging/src/tracing_macros.rs
//! Convenience macros for logging to a named section.
//!
//! Each macro forwards to the matching tracing macro with the section name
//! as the event target, which is how [`SectionLayer`](crate::SectionLayer)
//! recognises the section. The section must be a string literal.

/// Emit a debug message to a section.
///
/// # Example
/// ```ignore
/// section_debug!("VFS", "scanning {}", archive);
/// ```
#[macro_export]
macro_rules! section_debug {
    ($section:literal, $($arg:tt)*) => {
        ::tracing::debug!(target: $section, $($arg)*);
    };
}

/// Emit an info message to a section.
///
/// # Example
/// ```ignore
/// section_info!("Sound", "{} sources active", count);
/// ```
#[macro_export]
macro_rules! section_info {
    ($section:literal, $($arg:tt)*) => {
        ::tracing::info!(target: $section, $($arg)*);
    };
}

/// Emit a warning to a section.
///
/// # Example
/// ```ignore
/// section_warn!("Net", "peer {} timed out", peer);
/// ```
#[macro_export]
macro_rules! section_warn {
    ($section:literal, $($arg:tt)*) => {
        ::tracing::warn!(target: $section, $($arg)*);
    };
}

/// Emit an error to a section.
///
/// # Example
/// ```ignore
/// section_error!("VFS", "archive {} is corrupt", name);
/// ```
#[macro_export]
macro_rules! section_error {
    ($section:literal, $($arg:tt)*) => {
        ::tracing::error!(target: $section, $($arg)*);
    };
}
