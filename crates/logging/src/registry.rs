//! crates/logging/src/registry.rs
//! Registered log sections and their minimum levels.

use std::sync::atomic::{AtomicI32, Ordering};

use rustc_hash::FxHashMap;

use crate::levels::LEVEL_NONE;

/// A named logging channel.
///
/// The display name keeps the casing it was registered with; matching uses
/// the lowercase key. The minimum level is atomic so a registry shared with
/// logging call sites can still be activated in place.
#[derive(Debug)]
pub struct Section {
    name: String,
    key: String,
    min_level: AtomicI32,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            key: name.to_lowercase(),
            min_level: AtomicI32::new(LEVEL_NONE),
        }
    }

    /// Name as registered.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase name used for matching.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current minimum level; [`LEVEL_NONE`] while disabled.
    #[must_use]
    pub fn min_level(&self) -> i32 {
        self.min_level.load(Ordering::Relaxed)
    }

    /// Whether the section emits anything at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.min_level() < LEVEL_NONE
    }

    /// Whether a message at `level` passes this section's filter.
    #[must_use]
    pub fn admits(&self, level: i32) -> bool {
        let min_level = self.min_level();
        min_level < LEVEL_NONE && level >= min_level
    }

    fn set_min_level(&self, level: i32) {
        self.min_level.store(level, Ordering::Relaxed);
    }
}

/// The set of sections the program has declared as loggable.
///
/// Sections are added during startup through [`register`](Self::register)
/// and are never removed. Every section starts disabled.
#[derive(Debug, Default)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    index: FxHashMap<String, usize>,
}

impl SectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with `names` registered in order.
    pub fn with_sections<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.register(name.as_ref());
        }
        registry
    }

    /// Registers `name`. Returns `false` if a section with the same
    /// case-insensitive name already exists.
    pub fn register(&mut self, name: &str) -> bool {
        let section = Section::new(name);
        if self.index.contains_key(section.key()) {
            return false;
        }
        self.index.insert(section.key().to_owned(), self.sections.len());
        self.sections.push(section);
        true
    }

    /// Number of registered sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in registration order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    /// Looks a section up by case-insensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        let index = match self.index.get(name) {
            Some(index) => *index,
            None => *self.index.get(&name.to_lowercase())?,
        };
        self.sections.get(index)
    }

    /// Sets the minimum level of `name`. Returns `false` for unknown names.
    pub fn set_min_level(&self, name: &str, level: i32) -> bool {
        match self.get(name) {
            Some(section) => {
                section.set_min_level(level);
                true
            }
            None => false,
        }
    }

    /// Minimum level of `name`, if registered.
    #[must_use]
    pub fn min_level(&self, name: &str) -> Option<i32> {
        self.get(name).map(Section::min_level)
    }

    /// Whether a message at `level` tagged with `name` should be emitted.
    #[must_use]
    pub fn is_enabled(&self, name: &str, level: i32) -> bool {
        self.get(name).is_some_and(|section| section.admits(level))
    }

    /// Disables every section.
    pub fn disable_all(&self) {
        for section in &self.sections {
            section.set_min_level(LEVEL_NONE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_start_disabled() {
        let registry = SectionRegistry::with_sections(["Sound", "VFS"]);
        assert_eq!(registry.min_level("Sound"), Some(LEVEL_NONE));
        assert!(!registry.is_enabled("sound", 60));
        assert!(!registry.sections()[1].is_enabled());
    }

    #[test]
    fn registration_is_case_insensitive_and_keeps_order() {
        let mut registry = SectionRegistry::new();
        assert!(registry.register("Sound"));
        assert!(registry.register("VFS"));
        assert!(!registry.register("sound"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), ["Sound", "VFS"]);
        assert_eq!(registry.get("vfs").map(Section::key), Some("vfs"));
    }

    #[test]
    fn set_min_level_controls_admission() {
        let registry = SectionRegistry::with_sections(["Net"]);
        assert!(registry.set_min_level("NET", 40));

        assert!(registry.is_enabled("net", 40));
        assert!(registry.is_enabled("net", 50));
        assert!(!registry.is_enabled("net", 30));
        assert!(!registry.set_min_level("missing", 30));
        assert!(!registry.is_enabled("missing", 60));
    }

    #[test]
    fn disable_all_resets_levels() {
        let registry = SectionRegistry::with_sections(["A", "B"]);
        registry.set_min_level("a", 20);
        registry.disable_all();
        assert!(registry.sections().iter().all(|s| !s.is_enabled()));
    }

    #[test]
    fn empty_registry() {
        let registry = SectionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.names().count(), 0);
    }
}
