//! crates/logging/src/banners.rs
//! Startup reports describing the configuration and the host.

use std::env::consts;
use std::thread;

use crate::config::LogSettings;
use crate::sections::Profile;

/// Version string of this build.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Facts about the running build and host printed in the system banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemInfo {
    /// Program version.
    pub version: String,
    /// Startup profile the program runs with.
    pub profile: Profile,
    /// Operating system name.
    pub os: String,
    /// OS family (`unix`, `windows`).
    pub family: String,
    /// CPU architecture.
    pub arch: String,
    /// Pointer width in bits.
    pub word_size: u32,
    /// Logical CPU count; `None` if it cannot be queried.
    pub logical_cores: Option<usize>,
}

impl SystemInfo {
    /// Collects the information for the current process.
    #[must_use]
    pub fn detect(profile: Profile) -> Self {
        Self {
            version: VERSION.to_owned(),
            profile,
            os: consts::OS.to_owned(),
            family: consts::FAMILY.to_owned(),
            arch: consts::ARCH.to_owned(),
            word_size: usize::BITS,
            logical_cores: thread::available_parallelism().ok().map(usize::from),
        }
    }
}

/// Lines listing every setting changed from its default.
#[must_use]
pub fn config_banner(settings: &LogSettings) -> Vec<String> {
    let mut lines = vec!["============== <User Config> ==============".to_owned()];
    lines.extend(
        settings
            .non_default_entries()
            .into_iter()
            .map(|(key, value)| format!("  {key} = {value}")),
    );
    lines.push("============== </User Config> ==============".to_owned());
    lines
}

/// Lines describing the build and host.
#[must_use]
pub fn system_banner(info: &SystemInfo) -> Vec<String> {
    let cores = info
        .logical_cores
        .map_or_else(|| "unknown".to_owned(), |cores| cores.to_string());
    vec![
        "============== <User System> ==============".to_owned(),
        format!("          Version: {}", info.version),
        format!("    Build Profile: {}", info.profile),
        format!(" Operating System: {} ({})", info.os, info.family),
        format!("     Architecture: {}", info.arch),
        format!(" Binary Word Size: {}-bit", info.word_size),
        format!("Logical CPU Cores: {cores}"),
        "============== </User System> ==============".to_owned(),
    ]
}

/// One-line version banner.
#[must_use]
pub fn version_line(profile: Profile) -> String {
    format!("infolog {VERSION} ({profile})")
}

/// Line reporting an error caught at `source`.
#[must_use]
pub fn exception_line(source: &str, message: &str) -> String {
    format!("[{source}] exception \"{message}\"")
}

/// Logs [`config_banner`].
pub fn log_config_info(settings: &LogSettings) {
    for line in config_banner(settings) {
        tracing::info!("{line}");
    }
}

/// Logs [`system_banner`].
pub fn log_system_info(info: &SystemInfo) {
    for line in system_banner(info) {
        tracing::info!("{line}");
    }
}

/// Logs [`exception_line`] at error level.
pub fn log_exception_info(source: &str, message: &str) {
    tracing::error!("{}", exception_line(source, message));
}
