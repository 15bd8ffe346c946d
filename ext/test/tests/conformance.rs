//! Conformance tests that run YAML fixtures against recmix
//!
//! Run with: cargo test -p recmix-test --test conformance --features recmix-test/fixtures
//!
//! Note: This test file requires the `fixtures` feature to be enabled.

#![cfg(feature = "fixtures")]

use recmix::RegistryBuilder;
use recmix_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the fixtures directory at the workspace root
fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .parent() // ext
        .and_then(Path::parent) // workspace root
        .expect("Could not find workspace root")
        .join("fixtures")
}

/// Load and run all fixtures in a directory
fn run_fixtures_in_dir(dir: &Path) {
    assert!(dir.exists(), "Fixtures directory does not exist: {}", dir.display());

    let registry = recmix_test::register(RegistryBuilder::new()).build();
    let mut ran = 0;

    for entry in fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();

        if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            println!("Running fixture: {}", path.display());

            let yaml = fs::read_to_string(&path).expect("read yaml");
            let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
                panic!("Failed to parse {}: {}", path.display(), e);
            });

            for fixture in fixtures {
                println!("  Running: {}", fixture.name);
                fixture.run_and_assert(&registry);
                ran += 1;
            }
        }
    }

    assert!(ran > 0, "no fixtures found in {}", dir.display());
}

#[test]
fn test_decomposition() {
    run_fixtures_in_dir(&fixtures_dir().join("01_decomposition"));
}

#[test]
fn test_compatibility() {
    run_fixtures_in_dir(&fixtures_dir().join("02_compatibility"));
}

#[test]
fn test_loading() {
    run_fixtures_in_dir(&fixtures_dir().join("03_loading"));
}
