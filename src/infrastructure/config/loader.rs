use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

use crate::domain::error::ConfigError;
use crate::domain::models::{RawConfigBundle, Section};

/// How the loader treats absent section files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Every expected section file must exist.
    #[default]
    Strict,
    /// Only required section files must exist; absent optional ones load as empty mappings.
    RequiredOnly,
}

/// Reads a directory of per-section YAML files into a [`RawConfigBundle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader {
    policy: LoadPolicy,
}

impl ConfigLoader {
    /// Loader with the strict policy
    pub const fn new() -> Self {
        Self {
            policy: LoadPolicy::Strict,
        }
    }

    pub const fn with_policy(policy: LoadPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Load every expected section from `dir`.
    ///
    /// The returned bundle always holds one entry per [`Section::ALL`] member. Empty files
    /// load as empty mappings.
    pub fn load_directory(&self, dir: impl AsRef<Path>) -> Result<RawConfigBundle, ConfigError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut bundle = RawConfigBundle::new();
        for section in Section::ALL {
            let path = dir.join(section.file_name());
            let value = match read_section_file(&path)? {
                Some(value) => value,
                None if self.policy == LoadPolicy::RequiredOnly && !section.is_required() => {
                    debug!(%section, path = %path.display(), "optional config file absent, using empty section");
                    Value::Mapping(Mapping::new())
                }
                None => return Err(ConfigError::FileNotFound { section, path }),
            };
            debug!(%section, path = %path.display(), "loaded config section");
            bundle.insert(section, value);
        }

        info!(
            config_dir = %dir.display(),
            sections = bundle.len(),
            policy = ?self.policy,
            "configuration directory loaded"
        );
        Ok(bundle)
    }
}

/// Load `dir` with the strict policy.
pub fn load_config_dir(dir: impl AsRef<Path>) -> Result<RawConfigBundle, ConfigError> {
    ConfigLoader::new().load_directory(dir)
}

/// Read and parse one section file. `Ok(None)` means the file does not exist.
fn read_section_file(path: &Path) -> Result<Option<Value>, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_yaml(path, &contents).map(Some)
}

/// Parse YAML text, mapping empty and comment-only documents to an empty mapping.
pub(crate) fn parse_yaml(path: &Path, contents: &str) -> Result<Value, ConfigError> {
    if contents.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }

    let value: Value = serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match value {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    })
}
