//! Load-time validation conformance tests
//!
//! Proves that validating content against the registry up front
//! (`Interaction::validate`) reports the same configuration and input errors
//! that classification reports lazily. Answer type mismatches depend on the
//! learner and are only visible at classification time.
//!
//! Run with: cargo test -p tutor-test --test registry_conformance --features tutor-test/fixtures

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};

use tutor::{ClassifierRegistry, Interaction};
use tutor_test::fixture::{self, Fixture};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// The error load-time validation must report for this fixture, if any.
fn expected_load_error(fixture: &Fixture) -> Option<&str> {
    fixture
        .cases
        .iter()
        .filter_map(|case| case.error.as_deref())
        .find(|kind| *kind != "answer_type_mismatch")
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

fn validate_fixtures_in_dir(dir: &Path, registry: &ClassifierRegistry) {
    assert!(
        dir.exists(),
        "Fixtures directory does not exist: {}",
        dir.display()
    );

    for entry in fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            println!("Validating fixture: {}", path.display());

            let yaml = fs::read_to_string(&path).expect("read yaml");
            let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
                panic!("Failed to parse {}: {}", path.display(), e);
            });

            for fixture in fixtures {
                println!("  Validating: {}", fixture.name);

                let interaction: Interaction = serde_json::from_value(fixture.interaction.clone())
                    .unwrap_or_else(|e| panic!("Invalid interaction in '{}': {e}", fixture.name));

                let actual = interaction
                    .validate(registry)
                    .err()
                    .map(|e| fixture::classification_error_kind(&e));
                assert_eq!(
                    actual,
                    expected_load_error(&fixture),
                    "Fixture '{}': load-time validation disagrees with classification",
                    fixture.name
                );
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests - mirror the conformance.rs structure
// ═══════════════════════════════════════════════════════════════════════════════

fn core() -> ClassifierRegistry {
    ClassifierRegistry::with_core_interactions()
}

#[test]
fn test_numeric_validates() {
    validate_fixtures_in_dir(&fixtures_dir().join("01_numeric"), &core());
}

#[test]
fn test_fraction_validates() {
    validate_fixtures_in_dir(&fixtures_dir().join("02_fraction"), &core());
}

#[test]
fn test_ratio_validates() {
    validate_fixtures_in_dir(&fixtures_dir().join("03_ratio"), &core());
}

#[test]
fn test_units_and_clicks_validate() {
    validate_fixtures_in_dir(&fixtures_dir().join("04_units_and_clicks"), &core());
}

#[test]
fn test_text_and_selection_validate() {
    validate_fixtures_in_dir(&fixtures_dir().join("05_text_and_selection"), &core());
}

#[test]
fn test_semantics_validate() {
    validate_fixtures_in_dir(&fixtures_dir().join("06_semantics"), &core());
}

#[test]
fn test_extension_needs_extended_registry() {
    let dir = fixtures_dir().join("08_extension");
    validate_fixtures_in_dir(&dir, &tutor_test::registry());

    let yaml = fs::read_to_string(dir.join("parity.yaml")).expect("read yaml");
    let fixture = Fixture::from_yaml(&yaml).expect("parse");
    let interaction: Interaction =
        serde_json::from_value(fixture.interaction).expect("interaction");
    let error = interaction.validate(&core()).unwrap_err();
    assert_eq!(fixture::classification_error_kind(&error), "unknown_interaction");
    assert!(error.to_string().contains("ParityInput"));
}
