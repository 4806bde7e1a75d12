mod common;

use common::{valid_config_dir, write_section};
use riskpipe::{load_config_dir, ConfigError, ConfigLoader, LoadPolicy, Section};
use serde_yaml::{Mapping, Value};
use std::error::Error;
use std::fs;

#[test]
fn test_load_reference_directory() {
    let dir = valid_config_dir();
    let bundle = load_config_dir(dir.path()).unwrap();

    assert_eq!(bundle.len(), 8);
    let data = bundle.get(Section::Data).unwrap();
    assert_eq!(data["raw_data_path"], Value::from("/a"));
    assert_eq!(data["label_window_days"], Value::from(30));
    assert_eq!(
        bundle.get(Section::Evaluation),
        Some(&Value::Mapping(Mapping::new()))
    );
}

#[test]
fn test_missing_paths_file_is_fatal() {
    let dir = valid_config_dir();
    fs::remove_file(dir.path().join("paths.yaml")).unwrap();

    match load_config_dir(dir.path()) {
        Err(ConfigError::FileNotFound { section, path }) => {
            assert_eq!(section, Section::Paths);
            assert!(path.ends_with("paths.yaml"));
        }
        other => panic!("Expected FileNotFound for paths, got {other:?}"),
    }
}

#[test]
fn test_missing_optional_file_is_fatal_under_strict_policy() {
    let dir = valid_config_dir();
    fs::remove_file(dir.path().join("inference.yaml")).unwrap();

    assert!(matches!(
        load_config_dir(dir.path()),
        Err(ConfigError::FileNotFound {
            section: Section::Inference,
            ..
        })
    ));

    let bundle = ConfigLoader::with_policy(LoadPolicy::RequiredOnly)
        .load_directory(dir.path())
        .unwrap();
    assert!(bundle.contains(Section::Inference));
}

#[test]
fn test_malformed_yaml_chains_parse_error() {
    let dir = valid_config_dir();
    write_section(dir.path(), "tuning", "n_trials: [1, 2\nsearch: {");

    let err = load_config_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { ref path, .. } if path.ends_with("tuning.yaml")));
    assert!(err.source().is_some(), "parse error should chain the YAML error");
}

#[test]
fn test_nonexistent_directory() {
    let dir = valid_config_dir();
    let missing = dir.path().join("does-not-exist");

    let err = load_config_dir(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::DirectoryNotFound { .. }));
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn test_optional_sections_pass_through_untouched() {
    let dir = valid_config_dir();
    write_section(
        dir.path(),
        "features",
        "numeric:\n  - loan_amnt\n  - int_rate\ncategorical: [grade, home_ownership]\n",
    );

    let bundle = load_config_dir(dir.path()).unwrap();
    let features = bundle.get(Section::Features).unwrap();
    assert_eq!(features["numeric"][1], Value::from("int_rate"));
    assert_eq!(features["categorical"][0], Value::from("grade"));
}
