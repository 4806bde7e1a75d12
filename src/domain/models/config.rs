//! Validated pipeline configuration.
//!
//! These records are only built by the config validator. Fields are private and exposed
//! through accessors, so a `ValidatedConfig` cannot change once it exists.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Default `training.random_state`.
pub const DEFAULT_RANDOM_STATE: i64 = 42;

/// Default `logging.log_dir`.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedConfig {
    data: DataConfig,
    training: TrainingConfig,
    paths: PathsConfig,
    logging: LoggingConfig,
}

impl ValidatedConfig {
    pub(crate) const fn new(
        data: DataConfig,
        training: TrainingConfig,
        paths: PathsConfig,
        logging: LoggingConfig,
    ) -> Self {
        Self {
            data,
            training,
            paths,
            logging,
        }
    }

    pub const fn data(&self) -> &DataConfig {
        &self.data
    }

    pub const fn training(&self) -> &TrainingConfig {
        &self.training
    }

    pub const fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    pub const fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

/// Data locations and labelling window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataConfig {
    raw_data_path: String,
    processed_data_path: String,
    label_window_days: u64,
}

impl DataConfig {
    pub(crate) const fn new(
        raw_data_path: String,
        processed_data_path: String,
        label_window_days: u64,
    ) -> Self {
        Self {
            raw_data_path,
            processed_data_path,
            label_window_days,
        }
    }

    pub fn raw_data_path(&self) -> &str {
        &self.raw_data_path
    }

    pub fn processed_data_path(&self) -> &str {
        &self.processed_data_path
    }

    /// Number of days to look back when labelling. Always > 0.
    pub const fn label_window_days(&self) -> u64 {
        self.label_window_days
    }
}

/// Model selection and seeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingConfig {
    model_type: String,
    random_state: i64,
}

impl TrainingConfig {
    pub(crate) const fn new(model_type: String, random_state: i64) -> Self {
        Self {
            model_type,
            random_state,
        }
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    pub const fn random_state(&self) -> i64 {
        self.random_state
    }
}

/// Artifact output locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathsConfig {
    artifacts_root: String,
    models_dir: String,
    metrics_dir: String,
}

impl PathsConfig {
    pub(crate) const fn new(artifacts_root: String, models_dir: String, metrics_dir: String) -> Self {
        Self {
            artifacts_root,
            models_dir,
            metrics_dir,
        }
    }

    pub fn artifacts_root(&self) -> &str {
        &self.artifacts_root
    }

    pub fn models_dir(&self) -> &str {
        &self.models_dir
    }

    pub fn metrics_dir(&self) -> &str {
        &self.metrics_dir
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    level: LogLevel,
    enable_file: bool,
    log_dir: String,
}

impl LoggingConfig {
    pub(crate) const fn new(level: LogLevel, enable_file: bool, log_dir: String) -> Self {
        Self {
            level,
            enable_file,
            log_dir,
        }
    }

    pub const fn level(&self) -> LogLevel {
        self.level
    }

    pub const fn enable_file(&self) -> bool {
        self.enable_file
    }

    pub fn log_dir(&self) -> &str {
        &self.log_dir
    }
}

/// Severity threshold accepted in `logging.level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Closest tracing level. tracing has no CRITICAL, so it folds into ERROR.
    ///
    /// Configuring CRITICAL therefore still emits ERROR events; it is not stricter than ERROR.
    pub const fn as_tracing_level(self) -> tracing::Level {
        match self {
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warning => tracing::Level::WARN,
            Self::Error | Self::Critical => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parse_is_case_sensitive() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert!("warning".parse::<LogLevel>().is_err());
        assert!("TRACE".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_tracing_mapping() {
        assert_eq!(LogLevel::Warning.as_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Critical.as_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_serializes_level_as_uppercase() {
        let logging = LoggingConfig::new(LogLevel::Critical, false, DEFAULT_LOG_DIR.to_string());
        let value = serde_json::to_value(&logging).unwrap();
        assert_eq!(value["level"], "CRITICAL");
        assert_eq!(value["log_dir"], "logs");
        assert_eq!(value["enable_file"], false);
    }
}
