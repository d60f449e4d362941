//! crates/logging/src/activation.rs
//! Applies requested section levels to the registry.

use std::fmt;

use crate::levels::{LEVEL_NONE, Level, nearest_known_level};
use crate::registry::SectionRegistry;
use crate::sections::{SECTIONS_ENV, SectionLevelMap};

/// Available and enabled sections after an activation pass.
///
/// Both lists follow registration order. The [`Display`](fmt::Display)
/// implementation renders the block written to the log at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionReport {
    available: Vec<String>,
    enabled: Vec<(String, Level)>,
}

impl SectionReport {
    /// Every registered section.
    #[must_use]
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Enabled sections with their resolved level.
    #[must_use]
    pub fn enabled(&self) -> &[(String, Level)] {
        &self.enabled
    }

    /// Resolved level of `name`, if the pass enabled it.
    #[must_use]
    pub fn level_of(&self, name: &str) -> Option<Level> {
        self.enabled
            .iter()
            .find(|(section, _)| section.eq_ignore_ascii_case(name))
            .map(|(_, level)| *level)
    }

    /// The report as individual log lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.available.len() + self.enabled.len() + 7);
        lines.push("============== <Log Sections ([A]vailable, [E]nabled)> ==============".to_owned());
        lines.extend(self.available.iter().map(|name| format!("    [A] {name}")));
        lines.extend(
            self.enabled
                .iter()
                .map(|(name, level)| format!("    [E] {name} ({level})")),
        );
        lines.push("  ".to_owned());
        lines.push("  Enable or disable log sections using the sections configuration key".to_owned());
        lines.push(format!(
            "  or the {SECTIONS_ENV} environment variable (both comma separated)."
        ));
        lines.push("  Use \"none\" to disable the default log sections.".to_owned());
        lines.push("============== </Log Sections> ==============".to_owned());
        lines
    }
}

impl fmt::Display for SectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Enables the registered sections named in `requested`.
///
/// Each matching section gets its requested level snapped down to a known
/// level. Sections not requested, requested at [`LEVEL_NONE`] or above, or
/// requested below the lowest known level end up disabled. Requested names
/// that were never registered are ignored.
pub fn activate(requested: &SectionLevelMap, registry: &SectionRegistry) -> SectionReport {
    let mut report = SectionReport::default();

    for section in registry.sections() {
        report.available.push(section.name().to_owned());

        let level = requested
            .get(section.key())
            .copied()
            .filter(|level| *level < LEVEL_NONE)
            .and_then(nearest_known_level);

        match level {
            Some(level) => {
                registry.set_min_level(section.key(), level.as_i32());
                report.enabled.push((section.name().to_owned(), level));
            }
            None => {
                registry.set_min_level(section.key(), LEVEL_NONE);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, i32)]) -> SectionLevelMap {
        entries
            .iter()
            .map(|(name, level)| ((*name).to_owned(), *level))
            .collect()
    }

    #[test]
    fn requested_sections_are_snapped_and_enabled() {
        let registry = SectionRegistry::with_sections(["Sound", "VFS", "Net"]);
        let report = activate(&map(&[("sound", 36), ("net", 50)]), &registry);

        assert_eq!(registry.min_level("sound"), Some(35));
        assert_eq!(registry.min_level("net"), Some(50));
        assert_eq!(registry.min_level("vfs"), Some(LEVEL_NONE));
        assert_eq!(
            report.enabled(),
            [
                ("Sound".to_owned(), Level::Notice),
                ("Net".to_owned(), Level::Error)
            ]
        );
        assert_eq!(report.available(), ["Sound", "VFS", "Net"]);
    }

    #[test]
    fn none_level_and_too_low_levels_stay_disabled() {
        let registry = SectionRegistry::with_sections(["A", "B", "C"]);
        let report = activate(&map(&[("a", LEVEL_NONE), ("b", 1000), ("c", 3)]), &registry);

        assert!(report.enabled().is_empty());
        assert!(registry.sections().iter().all(|s| !s.is_enabled()));
    }

    #[test]
    fn unregistered_requests_are_ignored() {
        let registry = SectionRegistry::with_sections(["Sound"]);
        let report = activate(&map(&[("ghost", 30)]), &registry);

        assert_eq!(report.available(), ["Sound"]);
        assert!(report.enabled().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn report_renders_available_then_enabled() {
        let registry = SectionRegistry::with_sections(["Sound", "VFS"]);
        let report = activate(&map(&[("vfs", 30)]), &registry);
        let text = report.to_string();

        let available = text.find("[A] Sound").expect("available listed");
        let enabled = text.find("[E] VFS (INFO)").expect("enabled listed");
        assert!(available < enabled);
        assert!(!text.contains("[E] Sound"));
        assert!(text.contains(SECTIONS_ENV));
        assert_eq!(report.level_of("vfs"), Some(Level::Info));
    }
}
