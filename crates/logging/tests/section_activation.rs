//! Integration tests for applying requested section levels to a registry.

use logging::{
    LEVEL_NONE, Level, Profile, SectionRegistry, activate, parse_enabled_sections,
};

fn registry() -> SectionRegistry {
    SectionRegistry::with_sections(["Sound", "VFS", "Net", "DedicatedServer"])
}

// ============================================================================
// Level Snapping
// ============================================================================

/// Verifies requested levels snap down to the nearest known level.
#[test]
fn levels_snap_down() {
    let registry = registry();
    let requested = parse_enabled_sections("net:45,vfs:69,sound:36", None, Profile::Debug);
    activate(&requested, &registry);

    assert_eq!(registry.min_level("net"), Some(Level::Warning.as_i32()));
    assert_eq!(registry.min_level("vfs"), Some(Level::Fatal.as_i32()));
    assert_eq!(registry.min_level("sound"), Some(Level::Notice.as_i32()));
}

/// Verifies levels below DEBUG leave a section disabled.
#[test]
fn level_below_debug_disables() {
    let registry = registry();
    let report = activate(
        &parse_enabled_sections("sound:3", None, Profile::Release),
        &registry,
    );

    assert_eq!(report.level_of("sound"), None);
    assert!(!registry.get("sound").unwrap().is_enabled());
    assert_eq!(report.level_of("vfs"), Some(Level::Info));
}

/// Verifies NONE and anything above it leave a section disabled.
#[test]
fn none_level_disables() {
    let registry = registry();
    let requested = parse_enabled_sections("net:255,vfs:300", None, Profile::Debug);
    let report = activate(&requested, &registry);

    assert!(report.enabled().is_empty());
    assert_eq!(registry.min_level("net"), Some(LEVEL_NONE));
}

// ============================================================================
// Registry Effects
// ============================================================================

/// Verifies enabled sections admit records at or above their level only.
#[test]
fn enabled_section_admits_by_level() {
    let registry = registry();
    activate(
        &parse_enabled_sections("net:40", None, Profile::Release),
        &registry,
    );

    assert!(registry.is_enabled("Net", 40));
    assert!(registry.is_enabled("net", 60));
    assert!(!registry.is_enabled("net", 30));
    assert!(!registry.is_enabled("dedicatedserver", 60));
}

/// Verifies activation is idempotent and a later pass replaces an earlier
/// one.
#[test]
fn activation_is_idempotent() {
    let registry = registry();
    let headless = parse_enabled_sections("", None, Profile::Headless);

    let first = activate(&headless, &registry);
    let second = activate(&headless, &registry);
    assert_eq!(first, second);

    activate(&parse_enabled_sections("", Some("none"), Profile::Headless), &registry);
    assert!(registry.sections().iter().all(|section| !section.is_enabled()));
}

/// Verifies names requested but never registered do not create sections.
#[test]
fn unknown_sections_are_ignored() {
    let registry = registry();
    let report = activate(
        &parse_enabled_sections("ghost:20", None, Profile::Debug),
        &registry,
    );

    assert_eq!(registry.len(), 4);
    assert!(registry.get("ghost").is_none());
    assert_eq!(report.available().len(), 4);
}

// ============================================================================
// Report
// ============================================================================

/// Verifies the report lists sections in registration order with their
/// original spelling.
#[test]
fn report_keeps_registration_order() {
    let registry = registry();
    let report = activate(
        &parse_enabled_sections("", None, Profile::Headless),
        &registry,
    );

    assert_eq!(
        report.available(),
        ["Sound", "VFS", "Net", "DedicatedServer"]
    );
    assert_eq!(
        report.enabled(),
        [
            ("Sound".to_owned(), Level::Notice),
            ("VFS".to_owned(), Level::Info),
            ("DedicatedServer".to_owned(), Level::Info),
        ]
    );

    let lines = report.lines();
    assert!(lines.contains(&"    [A] Net".to_owned()));
    assert!(lines.contains(&"    [E] Sound (NOTICE)".to_owned()));
    assert!(lines.first().unwrap().contains("<Log Sections"));
    assert!(lines.last().unwrap().contains("</Log Sections>"));
}
