//! Config snapshots: a sorted YAML dump of a [`ValidatedConfig`] plus a SHA-256 digest of its
//! canonical JSON form.
//!
//! The canonical form sorts object keys at every level and uses compact separators, so the
//! digest depends only on the configuration's content.

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::loader::parse_yaml;
use super::validator::ConfigValidator;
use crate::domain::error::ConfigError;
use crate::domain::models::{RawConfigBundle, Section, ValidatedConfig};

/// File holding the human-readable dump.
pub const SNAPSHOT_FILE: &str = "config_snapshot.yaml";

/// File holding the lowercase hex digest.
pub const HASH_FILE: &str = "config_hash.txt";

/// What [`ConfigSnapshot::write`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotRecord {
    pub snapshot_path: PathBuf,
    pub hash_path: PathBuf,
    pub digest: String,
}

/// Outcome of re-checking a snapshot directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotVerification {
    /// Digest recorded in the hash file
    pub expected: String,
    /// Digest recomputed from the dump
    pub actual: String,
}

impl SnapshotVerification {
    pub fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

/// Writes and verifies config snapshots.
pub struct ConfigSnapshot;

impl ConfigSnapshot {
    /// The config as a JSON tree with keys sorted at every level.
    pub fn canonical_value(config: &ValidatedConfig) -> Result<JsonValue, ConfigError> {
        let value = serde_json::to_value(config)
            .map_err(|e| ConfigError::SnapshotEncode(e.to_string()))?;
        Ok(sort_keys(value))
    }

    /// Compact canonical JSON bytes, the digest input.
    pub fn canonical_bytes(config: &ValidatedConfig) -> Result<Vec<u8>, ConfigError> {
        let value = Self::canonical_value(config)?;
        serde_json::to_vec(&value).map_err(|e| ConfigError::SnapshotEncode(e.to_string()))
    }

    /// Lowercase hex SHA-256 of the canonical bytes.
    pub fn digest(config: &ValidatedConfig) -> Result<String, ConfigError> {
        let bytes = Self::canonical_bytes(config)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }

    /// Sorted-key YAML dump of the config.
    pub fn render_yaml(config: &ValidatedConfig) -> Result<String, ConfigError> {
        let value = Self::canonical_value(config)?;
        serde_yaml::to_string(&value).map_err(|e| ConfigError::SnapshotEncode(e.to_string()))
    }

    /// Write the dump and digest into `output_dir`, creating it if needed.
    ///
    /// Existing snapshot files are overwritten. The two writes are not atomic as a pair.
    pub fn write(
        config: &ValidatedConfig,
        output_dir: impl AsRef<Path>,
    ) -> Result<SnapshotRecord, ConfigError> {
        let output_dir = output_dir.as_ref();
        let yaml = Self::render_yaml(config)?;
        let digest = Self::digest(config)?;

        fs::create_dir_all(output_dir).map_err(|source| ConfigError::SnapshotWrite {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let snapshot_path = output_dir.join(SNAPSHOT_FILE);
        write_file(&snapshot_path, yaml.as_bytes())?;

        let hash_path = output_dir.join(HASH_FILE);
        write_file(&hash_path, digest.as_bytes())?;

        info!(
            digest = %digest,
            snapshot = %snapshot_path.display(),
            "config snapshot written"
        );

        Ok(SnapshotRecord {
            snapshot_path,
            hash_path,
            digest,
        })
    }

    /// Read a snapshot directory back, re-validate the dump and recompute its digest.
    ///
    /// A digest mismatch is reported through [`SnapshotVerification::matches`], not as an
    /// error.
    pub fn verify(snapshot_dir: impl AsRef<Path>) -> Result<SnapshotVerification, ConfigError> {
        let (config, expected) = Self::read(snapshot_dir)?;
        let actual = Self::digest(&config)?;
        Ok(SnapshotVerification { expected, actual })
    }

    /// Load the validated config and recorded digest from a snapshot directory.
    pub fn read(
        snapshot_dir: impl AsRef<Path>,
    ) -> Result<(ValidatedConfig, String), ConfigError> {
        let snapshot_dir = snapshot_dir.as_ref();
        let snapshot_path = snapshot_dir.join(SNAPSHOT_FILE);
        let hash_path = snapshot_dir.join(HASH_FILE);

        let yaml = read_file(&snapshot_path)?;
        let expected = read_file(&hash_path)?.trim().to_string();

        let bundle = snapshot_bundle(&snapshot_path, parse_yaml(&snapshot_path, &yaml)?)?;
        let config = ConfigValidator::validate(&bundle)?;
        Ok((config, expected))
    }
}

/// Write `config`'s snapshot into `output_dir`.
pub fn write_snapshot(
    config: &ValidatedConfig,
    output_dir: impl AsRef<Path>,
) -> Result<SnapshotRecord, ConfigError> {
    ConfigSnapshot::write(config, output_dir)
}

fn sort_keys(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut entries: Vec<(String, JsonValue)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            JsonValue::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ConfigError> {
    fs::write(path, contents).map_err(|source| ConfigError::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })
}

/// A snapshot dump holds exactly the required sections at its top level.
fn snapshot_bundle(path: &Path, value: YamlValue) -> Result<RawConfigBundle, ConfigError> {
    let invalid = |reason: String| ConfigError::SnapshotInvalid {
        path: path.to_path_buf(),
        reason,
    };

    let YamlValue::Mapping(mapping) = value else {
        return Err(invalid("top level is not a mapping".to_string()));
    };

    let mut bundle = RawConfigBundle::new();
    for (key, section_value) in mapping {
        let name = key
            .as_str()
            .ok_or_else(|| invalid("non-string section key".to_string()))?;
        let section = name
            .parse::<Section>()
            .ok()
            .filter(|section| section.is_required())
            .ok_or_else(|| invalid(format!("unexpected section '{name}'")))?;
        bundle.insert(section, section_value);
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        DataConfig, LogLevel, LoggingConfig, PathsConfig, TrainingConfig,
    };
    use tempfile::TempDir;

    fn sample_config() -> ValidatedConfig {
        ValidatedConfig::new(
            DataConfig::new("/a".to_string(), "/b".to_string(), 30),
            TrainingConfig::new("xgboost".to_string(), 42),
            PathsConfig::new(
                "/art".to_string(),
                "/art/models".to_string(),
                "/art/metrics".to_string(),
            ),
            LoggingConfig::new(LogLevel::Info, false, "logs".to_string()),
        )
    }

    #[test]
    fn test_canonical_bytes_are_sorted_and_compact() {
        let bytes = ConfigSnapshot::canonical_bytes(&sample_config()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            concat!(
                r#"{"data":{"label_window_days":30,"processed_data_path":"/b","raw_data_path":"/a"},"#,
                r#""logging":{"enable_file":false,"level":"INFO","log_dir":"logs"},"#,
                r#""paths":{"artifacts_root":"/art","metrics_dir":"/art/metrics","models_dir":"/art/models"},"#,
                r#""training":{"model_type":"xgboost","random_state":42}}"#
            )
        );
    }

    #[test]
    fn test_digest_is_sha256_of_canonical_bytes() {
        let config = sample_config();
        let bytes = ConfigSnapshot::canonical_bytes(&config).unwrap();
        let digest = ConfigSnapshot::digest(&config).unwrap();
        assert_eq!(digest, hex::encode(Sha256::digest(&bytes)));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_yaml_dump_has_sorted_top_level_keys() {
        let yaml = ConfigSnapshot::render_yaml(&sample_config()).unwrap();
        let top_level: Vec<&str> = yaml
            .lines()
            .filter(|line| !line.starts_with(' '))
            .collect();
        assert_eq!(top_level, vec!["data:", "logging:", "paths:", "training:"]);
    }

    #[test]
    fn test_write_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("runs").join("2024").join("snapshot");

        let record = ConfigSnapshot::write(&sample_config(), &out).unwrap();
        assert!(record.snapshot_path.is_file());
        assert_eq!(
            fs::read_to_string(&record.hash_path).unwrap(),
            record.digest
        );
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = ConfigSnapshot::write(&sample_config(), blocker.join("out")).unwrap_err();
        assert!(matches!(err, ConfigError::SnapshotWrite { .. }));
    }

    #[test]
    fn test_verify_roundtrip_and_tamper_detection() {
        let dir = TempDir::new().unwrap();
        ConfigSnapshot::write(&sample_config(), dir.path()).unwrap();

        let verification = ConfigSnapshot::verify(dir.path()).unwrap();
        assert!(verification.matches());

        let snapshot_path = dir.path().join(SNAPSHOT_FILE);
        let tampered = fs::read_to_string(&snapshot_path)
            .unwrap()
            .replace("xgboost", "lightgbm");
        fs::write(&snapshot_path, tampered).unwrap();

        let verification = ConfigSnapshot::verify(dir.path()).unwrap();
        assert!(!verification.matches());
    }

    #[test]
    fn test_verify_rejects_unexpected_sections() {
        let dir = TempDir::new().unwrap();
        ConfigSnapshot::write(&sample_config(), dir.path()).unwrap();

        let snapshot_path = dir.path().join(SNAPSHOT_FILE);
        let mut yaml = fs::read_to_string(&snapshot_path).unwrap();
        yaml.push_str("tuning:\n  trials: 5\n");
        fs::write(&snapshot_path, yaml).unwrap();

        assert!(matches!(
            ConfigSnapshot::verify(dir.path()),
            Err(ConfigError::SnapshotInvalid { .. })
        ));
    }

    #[test]
    fn test_verify_missing_hash_file() {
        let dir = TempDir::new().unwrap();
        ConfigSnapshot::write(&sample_config(), dir.path()).unwrap();
        fs::remove_file(dir.path().join(HASH_FILE)).unwrap();

        assert!(matches!(
            ConfigSnapshot::verify(dir.path()),
            Err(ConfigError::SnapshotRead { .. })
        ));
    }
}
