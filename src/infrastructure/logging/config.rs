use serde::Serialize;
use std::path::PathBuf;

use crate::domain::models::{LogLevel, LoggingConfig};

/// Logger settings for one run
#[derive(Debug, Clone, Serialize)]
pub struct LogSettings {
    /// Threshold before `RUST_LOG` overrides
    pub level: LogLevel,

    /// Console output format
    pub format: LogFormat,

    /// Directory for the log file (if None logs only to stderr)
    pub log_dir: Option<PathBuf>,

    /// Log file name inside `log_dir`
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogSettings {
    /// Settings derived from a validated `logging` section. `file_stem` names the log file.
    pub fn from_config(config: &LoggingConfig, file_stem: &str) -> Self {
        Self {
            level: config.level(),
            format: default_format(),
            log_dir: config
                .enable_file()
                .then(|| PathBuf::from(config.log_dir())),
            file_name: format!("{file_stem}.log"),
        }
    }

    /// Force DEBUG when `verbose` is set.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.level = LogLevel::Debug;
        }
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: default_format(),
            log_dir: None,
            file_name: default_file_name(),
        }
    }
}

const fn default_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_file_name() -> String {
    "riskpipe.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ConfigValidator;
    use crate::domain::models::{RawConfigBundle, Section};

    fn logging_config(yaml: &str) -> LoggingConfig {
        let parse = |text: &str| serde_yaml::from_str::<serde_yaml::Value>(text).unwrap();
        let bundle: RawConfigBundle = [
            (
                Section::Data,
                parse("raw_data_path: r\nprocessed_data_path: p\nlabel_window_days: 1"),
            ),
            (Section::Training, parse("model_type: m")),
            (
                Section::Paths,
                parse("artifacts_root: a\nmodels_dir: m\nmetrics_dir: x"),
            ),
            (Section::Logging, parse(yaml)),
        ]
        .into_iter()
        .collect();
        ConfigValidator::validate(&bundle)
            .unwrap()
            .logging()
            .clone()
    }

    #[test]
    fn test_file_logging_disabled_by_default() {
        let settings = LogSettings::from_config(&logging_config("level: WARNING"), "train_pipeline");
        assert_eq!(settings.level, LogLevel::Warning);
        assert!(settings.log_dir.is_none());
        assert_eq!(settings.file_name, "train_pipeline.log");
    }

    #[test]
    fn test_file_logging_uses_log_dir() {
        let settings = LogSettings::from_config(
            &logging_config("level: ERROR\nenable_file: true\nlog_dir: /var/log/riskpipe"),
            "validate_pipeline",
        );
        assert_eq!(settings.log_dir, Some(PathBuf::from("/var/log/riskpipe")));
    }

    #[test]
    fn test_verbose_forces_debug() {
        let settings = LogSettings::default().verbose(true);
        assert_eq!(settings.level, LogLevel::Debug);
        let settings = LogSettings::default().verbose(false);
        assert_eq!(settings.level, LogLevel::Info);
    }
}
