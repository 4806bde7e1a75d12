use serde_yaml::Value;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

use super::fields::SectionReader;
use super::loader::ConfigLoader;
use crate::domain::error::{ConfigError, SectionError, ValidationErrors};
use crate::domain::models::{
    DataConfig, LogLevel, LoggingConfig, PathsConfig, RawConfigBundle, Section, TrainingConfig,
    ValidatedConfig, DEFAULT_LOG_DIR, DEFAULT_RANDOM_STATE,
};

const LOG_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

/// Turns a [`RawConfigBundle`] into a [`ValidatedConfig`].
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the required sections of `bundle`.
    ///
    /// Fails with [`ConfigError::MissingRequiredSections`] naming every absent required
    /// section, or with [`ConfigError::Validation`] carrying every failing section and all
    /// of its field errors. Optional sections are ignored.
    pub fn validate(bundle: &RawConfigBundle) -> Result<ValidatedConfig, ConfigError> {
        let missing: BTreeSet<Section> = bundle.missing_required().into_iter().collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingRequiredSections { missing });
        }

        let mut failures = Vec::new();
        let data = collect(validate_data(section_value(bundle, Section::Data)), &mut failures);
        let training = collect(
            validate_training(section_value(bundle, Section::Training)),
            &mut failures,
        );
        let paths = collect(validate_paths(section_value(bundle, Section::Paths)), &mut failures);
        let logging = collect(
            validate_logging(section_value(bundle, Section::Logging)),
            &mut failures,
        );

        match (data, training, paths, logging) {
            (Some(data), Some(training), Some(paths), Some(logging)) => {
                debug!("configuration validated");
                Ok(ValidatedConfig::new(data, training, paths, logging))
            }
            _ => {
                for failure in &failures {
                    warn!(section = %failure.section, errors = failure.errors.len(), "config section invalid");
                }
                Err(ConfigError::Validation(ValidationErrors::new(failures)))
            }
        }
    }
}

/// Load `dir` and validate it.
pub fn load_app_config(dir: impl AsRef<Path>) -> Result<ValidatedConfig, ConfigError> {
    load_app_config_with(dir, ConfigLoader::new())
}

/// Load `dir` with a specific loader and validate it.
pub fn load_app_config_with(
    dir: impl AsRef<Path>,
    loader: ConfigLoader,
) -> Result<ValidatedConfig, ConfigError> {
    let bundle = loader.load_directory(dir)?;
    ConfigValidator::validate(&bundle)
}

// Presence of every required section is checked before any lookup.
fn section_value(bundle: &RawConfigBundle, section: Section) -> &Value {
    static EMPTY: Value = Value::Null;
    bundle.get(section).unwrap_or(&EMPTY)
}

fn collect<T>(result: Result<T, SectionError>, failures: &mut Vec<SectionError>) -> Option<T> {
    result.map_err(|failure| failures.push(failure)).ok()
}

fn validate_data(value: &Value) -> Result<DataConfig, SectionError> {
    let mut reader = SectionReader::new(Section::Data, value)?;
    let raw_data_path = reader.string("raw_data_path");
    let processed_data_path = reader.string("processed_data_path");
    let label_window_days = reader.positive_int("label_window_days");

    let built = match (raw_data_path, processed_data_path, label_window_days) {
        (Some(raw), Some(processed), Some(window)) => Some(DataConfig::new(raw, processed, window)),
        _ => None,
    };
    reader.finish(built)
}

fn validate_training(value: &Value) -> Result<TrainingConfig, SectionError> {
    let mut reader = SectionReader::new(Section::Training, value)?;
    let model_type = reader.string("model_type");
    let random_state = reader.int_or("random_state", DEFAULT_RANDOM_STATE);

    let built = model_type
        .zip(random_state)
        .map(|(model_type, random_state)| TrainingConfig::new(model_type, random_state));
    reader.finish(built)
}

fn validate_paths(value: &Value) -> Result<PathsConfig, SectionError> {
    let mut reader = SectionReader::new(Section::Paths, value)?;
    let artifacts_root = reader.string("artifacts_root");
    let models_dir = reader.string("models_dir");
    let metrics_dir = reader.string("metrics_dir");

    let built = match (artifacts_root, models_dir, metrics_dir) {
        (Some(root), Some(models), Some(metrics)) => Some(PathsConfig::new(root, models, metrics)),
        _ => None,
    };
    reader.finish(built)
}

fn validate_logging(value: &Value) -> Result<LoggingConfig, SectionError> {
    let mut reader = SectionReader::new(Section::Logging, value)?;
    let level = reader.one_of::<LogLevel>("level", &LOG_LEVELS);
    let enable_file = reader.bool_or("enable_file", false);
    let log_dir = reader.string_or("log_dir", DEFAULT_LOG_DIR);

    let built = match (level, enable_file, log_dir) {
        (Some(level), Some(enable_file), Some(log_dir)) => {
            Some(LoggingConfig::new(level, enable_file, log_dir))
        }
        _ => None,
    };
    reader.finish(built)
}
