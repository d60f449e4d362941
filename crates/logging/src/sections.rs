//! crates/logging/src/sections.rs
//! Parsing of the enabled-sections lists from configuration and environment.
//!
//! Both sources use the same syntax: a comma-separated list of `name` or
//! `name:level` tokens. The lists are concatenated rather than overriding
//! each other, except that an environment value of `none` discards
//! everything.

use std::env;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::levels::Level;

/// Environment variable holding extra sections, or `none`.
#[doc(alias = "INFOLOG_SECTIONS")]
pub const SECTIONS_ENV: &str = "INFOLOG_SECTIONS";

/// Requested level per lowercase section name, before snapping.
pub type SectionLevelMap = FxHashMap<String, i32>;

/// Startup profile selecting forced sections and the default level.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Profile {
    /// Developer build: sections default to DEBUG, nothing forced.
    Debug,
    /// Regular build: sound and VFS are kept at a baseline verbosity.
    #[default]
    Release,
    /// Server without a display: release baseline plus the server section.
    Headless,
    /// Standalone tool without a configuration store.
    Tooling,
}

impl Profile {
    /// Profile matching how the current binary was compiled.
    #[must_use]
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Lowercase name of the profile.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
            Self::Headless => "headless",
            Self::Tooling => "tooling",
        }
    }

    /// Sections that are always enabled ahead of user input.
    #[must_use]
    pub const fn forced_sections(self) -> &'static str {
        match self {
            Self::Debug => "",
            Self::Release => "sound:35,vfs:30",
            Self::Headless => "dedicatedserver,sound:35,vfs:30",
            Self::Tooling => "unitsync,archivescanner",
        }
    }

    /// Level assigned to tokens without an explicit level.
    #[must_use]
    pub const fn default_level(self) -> i32 {
        match self {
            Self::Debug | Self::Tooling => Level::Debug.as_i32(),
            Self::Release | Self::Headless => Level::Info.as_i32(),
        }
    }

    /// Whether the stored configuration contributes sections.
    #[must_use]
    pub const fn reads_config(self) -> bool {
        !matches!(self, Self::Tooling)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a profile name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown profile '{0}'; expected debug, release, headless or tooling")]
pub struct ProfileParseError(String);

impl FromStr for Profile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Self::Debug, Self::Release, Self::Headless, Self::Tooling]
            .into_iter()
            .find(|profile| s.eq_ignore_ascii_case(profile.label()))
            .ok_or_else(|| ProfileParseError(s.to_owned()))
    }
}

/// Reads [`SECTIONS_ENV`]. Unset or non-UTF-8 values count as absent.
#[must_use]
pub fn env_sections() -> Option<String> {
    env::var(SECTIONS_ENV).ok()
}

/// Merges forced, configured and environment sections into one map.
///
/// `env_override` equal to `none` (any case) yields an empty map regardless of
/// the other inputs. Later tokens overwrite earlier ones for the same name.
pub fn parse_enabled_sections(
    config_sections: &str,
    env_override: Option<&str>,
    profile: Profile,
) -> SectionLevelMap {
    let env_override = env_override.map(str::trim).filter(|value| !value.is_empty());
    if env_override.is_some_and(|value| value.eq_ignore_ascii_case("none")) {
        return SectionLevelMap::default();
    }

    let mut combined = String::from(profile.forced_sections());
    if profile.reads_config() {
        combined.push(',');
        combined.push_str(config_sections);
    }
    if let Some(value) = env_override {
        combined.push(',');
        combined.push_str(value);
    }

    let combined = combined.to_lowercase();
    let default_level = profile.default_level();

    let mut sections = SectionLevelMap::default();
    for token in combined.trim().split(',') {
        if let Some((name, level)) = parse_section_token(token, default_level) {
            sections.insert(name.to_owned(), level);
        }
    }
    sections
}

/// Splits `name[:level]`; `None` for empty tokens.
fn parse_section_token(token: &str, default_level: i32) -> Option<(&str, i32)> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let (name, level) = match token.split_once(':') {
        Some((name, level)) => (name.trim(), level.trim()),
        None => (token, ""),
    };
    if name.is_empty() {
        return None;
    }
    if level.is_empty() {
        return Some((name, default_level));
    }

    match level.parse::<i32>() {
        Ok(level) => Some((name, level)),
        Err(_) => {
            tracing::warn!(
                "invalid level '{level}' for log section '{name}', using {default_level}"
            );
            Some((name, default_level))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_without_level_uses_default() {
        assert_eq!(parse_section_token("vfs", 30), Some(("vfs", 30)));
        assert_eq!(parse_section_token("vfs:", 30), Some(("vfs", 30)));
    }

    #[test]
    fn token_with_level() {
        assert_eq!(parse_section_token("sound:3", 30), Some(("sound", 3)));
        assert_eq!(parse_section_token("net:-5", 30), Some(("net", -5)));
        assert_eq!(parse_section_token(" net : 40 ", 30), Some(("net", 40)));
    }

    #[test]
    fn token_splits_on_first_colon_only() {
        assert_eq!(parse_section_token("a:1:2", 30), Some(("a", 30)));
    }

    #[test]
    fn malformed_level_falls_back_to_default() {
        assert_eq!(parse_section_token("sound:loud", 20), Some(("sound", 20)));
        assert_eq!(parse_section_token("sound:99999999999", 20), Some(("sound", 20)));
    }

    #[test]
    fn empty_tokens_are_skipped() {
        assert_eq!(parse_section_token("", 30), None);
        assert_eq!(parse_section_token("   ", 30), None);
        assert_eq!(parse_section_token(":40", 30), None);
    }

    #[test]
    fn profile_parses_case_insensitively() {
        assert_eq!("Headless".parse::<Profile>(), Ok(Profile::Headless));
        assert_eq!(" debug ".parse::<Profile>(), Ok(Profile::Debug));
        assert!("server".parse::<Profile>().is_err());
    }

    #[test]
    fn profile_defaults() {
        assert_eq!(Profile::default(), Profile::Release);
        assert_eq!(Profile::Debug.default_level(), 20);
        assert_eq!(Profile::Headless.default_level(), 30);
        assert!(!Profile::Tooling.reads_config());
        assert_eq!(Profile::Tooling.to_string(), "tooling");
    }
}
