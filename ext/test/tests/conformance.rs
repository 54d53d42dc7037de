//! Conformance tests that run YAML fixtures against tutor
//!
//! Run with: cargo test -p tutor-test --test conformance --features tutor-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tutor::ClassifierRegistry;
use tutor_test::fixture::{Fixture, Walkthrough};

/// The fixtures directory of this crate
fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn core_registry() -> Arc<ClassifierRegistry> {
    Arc::new(ClassifierRegistry::with_core_interactions())
}

/// Every `.yaml`/`.yml` file in a directory, sorted
fn yaml_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        panic!("Fixtures directory does not exist: {}", dir.display());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| {
            path.extension()
                .is_some_and(|e| e == "yaml" || e == "yml")
        })
        .collect();
    paths.sort();
    paths
}

/// Load and run all classification fixtures in a directory
fn run_fixtures_in_dir(dir: &Path, registry: &Arc<ClassifierRegistry>) {
    for path in yaml_files(dir) {
        println!("Running fixture: {}", path.display());

        let yaml = fs::read_to_string(&path).expect("read yaml");

        // Parse potentially multiple fixtures (separated by ---)
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {}", path.display(), e);
        });

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert(Arc::clone(registry));
        }
    }
}

/// Load and play all walkthroughs in a directory
fn run_walkthroughs_in_dir(dir: &Path, registry: &Arc<ClassifierRegistry>) {
    for path in yaml_files(dir) {
        println!("Running walkthrough: {}", path.display());

        let yaml = fs::read_to_string(&path).expect("read yaml");
        let walkthroughs = Walkthrough::from_yaml_multi(&yaml).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {}", path.display(), e);
        });

        for walkthrough in walkthroughs {
            println!("  Playing: {}", walkthrough.name);
            walkthrough.run_and_assert(Arc::clone(registry));
        }
    }
}

#[test]
fn test_numeric() {
    run_fixtures_in_dir(&fixtures_dir().join("01_numeric"), &core_registry());
}

#[test]
fn test_fraction() {
    run_fixtures_in_dir(&fixtures_dir().join("02_fraction"), &core_registry());
}

#[test]
fn test_ratio() {
    run_fixtures_in_dir(&fixtures_dir().join("03_ratio"), &core_registry());
}

#[test]
fn test_units_and_clicks() {
    run_fixtures_in_dir(&fixtures_dir().join("04_units_and_clicks"), &core_registry());
}

#[test]
fn test_text_and_selection() {
    run_fixtures_in_dir(&fixtures_dir().join("05_text_and_selection"), &core_registry());
}

#[test]
fn test_semantics() {
    run_fixtures_in_dir(&fixtures_dir().join("06_semantics"), &core_registry());
}

#[test]
fn test_walkthroughs() {
    run_walkthroughs_in_dir(&fixtures_dir().join("07_walkthroughs"), &core_registry());
}

#[test]
fn test_extension() {
    let registry = Arc::new(tutor_test::registry());
    run_fixtures_in_dir(&fixtures_dir().join("08_extension"), &registry);
}
