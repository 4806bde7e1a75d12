//! Common test utilities for integration tests
//!
//! Provides config directory fixtures shared across the integration test files.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const DATA_YAML: &str = "raw_data_path: /a\nprocessed_data_path: /b\nlabel_window_days: 30\n";
pub const TRAINING_YAML: &str = "model_type: xgboost\n";
pub const PATHS_YAML: &str =
    "artifacts_root: /art\nmodels_dir: /art/models\nmetrics_dir: /art/metrics\n";
pub const LOGGING_YAML: &str = "level: INFO\n";

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write (or overwrite) one section file.
pub fn write_section(dir: &Path, section: &str, contents: &str) {
    fs::write(dir.join(format!("{section}.yaml")), contents)
        .unwrap_or_else(|e| panic!("Failed to write {section}.yaml: {e}"));
}

/// Populate `dir` with the reference configuration: four valid required sections and
/// four empty optional ones.
pub fn write_valid_config(dir: &Path) {
    write_section(dir, "data", DATA_YAML);
    write_section(dir, "training", TRAINING_YAML);
    write_section(dir, "paths", PATHS_YAML);
    write_section(dir, "logging", LOGGING_YAML);
    for optional in ["features", "tuning", "evaluation", "inference"] {
        write_section(dir, optional, "");
    }
}

/// Temporary directory holding the reference configuration.
pub fn valid_config_dir() -> TempDir {
    let dir = temp_dir();
    write_valid_config(dir.path());
    dir
}
