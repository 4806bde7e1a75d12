//! Pipeline entry points.
//!
//! Training, validation, inference and retraining share one shape: load configuration,
//! open the run span, do the work, report. The work itself is still a placeholder; only the
//! configuration handling is real.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::error::ConfigError;
use crate::domain::models::{RawConfigBundle, Section, ValidatedConfig};
use crate::infrastructure::config::{ConfigLoader, ConfigSnapshot, ConfigValidator, SnapshotRecord};
use crate::infrastructure::logging::{LogSettings, RunContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    Train,
    Validate,
    Inference,
    Retrain,
}

impl PipelineKind {
    /// Logger and log file name, e.g. `train_pipeline`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Train => "train_pipeline",
            Self::Validate => "validate_pipeline",
            Self::Inference => "inference_pipeline",
            Self::Retrain => "retrain_pipeline",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Train => "Training",
            Self::Validate => "Validation",
            Self::Inference => "Inference",
            Self::Retrain => "Retraining",
        }
    }

    /// Training and validation run on the validated config; inference and retraining
    /// only need the raw bundle.
    pub const fn requires_validated_config(self) -> bool {
        matches!(self, Self::Train | Self::Validate)
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration a pipeline runs with.
#[derive(Debug, Clone)]
pub enum PipelineConfig {
    Validated(ValidatedConfig),
    Raw(RawConfigBundle),
}

impl PipelineConfig {
    /// Load `config_dir` at the level `kind` needs.
    pub fn load(
        kind: PipelineKind,
        config_dir: &Path,
        loader: ConfigLoader,
    ) -> Result<Self, ConfigError> {
        let bundle = loader.load_directory(config_dir)?;
        if kind.requires_validated_config() {
            ConfigValidator::validate(&bundle).map(Self::Validated)
        } else {
            Ok(Self::Raw(bundle))
        }
    }

    /// Logger settings for this run. Raw bundles are never trusted for logging setup.
    pub fn log_settings(&self, kind: PipelineKind) -> LogSettings {
        match self {
            Self::Validated(config) => LogSettings::from_config(config.logging(), kind.name()),
            Self::Raw(_) => LogSettings {
                file_name: format!("{}.log", kind.name()),
                ..LogSettings::default()
            },
        }
    }

    pub fn sections(&self) -> Vec<Section> {
        match self {
            Self::Validated(_) => Section::REQUIRED.to_vec(),
            Self::Raw(bundle) => bundle.sections().collect(),
        }
    }

    pub const fn validated(&self) -> Option<&ValidatedConfig> {
        match self {
            Self::Validated(config) => Some(config),
            Self::Raw(_) => None,
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub pipeline: PipelineKind,
    pub run_id: String,
    pub config_dir: PathBuf,
    pub sections: Vec<Section>,
    pub validated: bool,
    pub snapshot: Option<SnapshotRecord>,
}

/// Runs one pipeline for one [`RunContext`].
pub struct PipelineRunner<'a> {
    kind: PipelineKind,
    context: &'a RunContext,
}

impl<'a> PipelineRunner<'a> {
    pub const fn new(kind: PipelineKind, context: &'a RunContext) -> Self {
        Self { kind, context }
    }

    /// Execute the pipeline inside the run span.
    ///
    /// With `snapshot_dir` set, the validated config is snapshotted there first.
    pub fn run(
        &self,
        config_dir: &Path,
        config: &PipelineConfig,
        snapshot_dir: Option<&Path>,
    ) -> Result<PipelineReport> {
        let span = self.context.span();
        let _entered = span.enter();

        info!(config_dir = %config_dir.display(), "{} pipeline config loaded successfully", self.kind.title());
        info!("Run ID: {}", self.context.run_id());

        let snapshot = match (snapshot_dir, config.validated()) {
            (Some(dir), Some(validated)) => {
                let record = ConfigSnapshot::write(validated, dir)
                    .with_context(|| format!("Failed to snapshot config into {}", dir.display()))?;
                info!(digest = %record.digest, "configuration snapshot recorded");
                Some(record)
            }
            (Some(_), None) => bail!(
                "{} pipeline does not validate its config and cannot snapshot it",
                self.kind.title()
            ),
            (None, _) => None,
        };

        info!("Run completed successfully (placeholder)");

        Ok(PipelineReport {
            pipeline: self.kind,
            run_id: self.context.run_id().to_string(),
            config_dir: config_dir.to_path_buf(),
            sections: config.sections(),
            validated: config.validated().is_some(),
            snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config_dir(dir: &Path) {
        let files = [
            ("data.yaml", "raw_data_path: /a\nprocessed_data_path: /b\nlabel_window_days: 30\n"),
            ("training.yaml", "model_type: xgboost\n"),
            ("paths.yaml", "artifacts_root: /art\nmodels_dir: /art/models\nmetrics_dir: /art/metrics\n"),
            ("logging.yaml", "level: INFO\n"),
            ("features.yaml", ""),
            ("tuning.yaml", ""),
            ("evaluation.yaml", ""),
            ("inference.yaml", ""),
        ];
        for (name, contents) in files {
            fs::write(dir.join(name), contents).unwrap();
        }
    }

    #[test]
    fn test_config_requirement_per_pipeline() {
        let dir = TempDir::new().unwrap();
        write_config_dir(dir.path());

        for kind in [PipelineKind::Train, PipelineKind::Validate] {
            let config = PipelineConfig::load(kind, dir.path(), ConfigLoader::new()).unwrap();
            assert!(config.validated().is_some(), "{kind} should validate");
        }
        for kind in [PipelineKind::Inference, PipelineKind::Retrain] {
            let config = PipelineConfig::load(kind, dir.path(), ConfigLoader::new()).unwrap();
            assert!(config.validated().is_none(), "{kind} should stay raw");
            assert_eq!(config.sections().len(), Section::ALL.len());
        }
    }

    #[test]
    fn test_raw_pipelines_tolerate_invalid_required_sections() {
        let dir = TempDir::new().unwrap();
        write_config_dir(dir.path());
        fs::write(dir.path().join("logging.yaml"), "level: TRACE\n").unwrap();

        assert!(PipelineConfig::load(PipelineKind::Inference, dir.path(), ConfigLoader::new()).is_ok());
        assert!(matches!(
            PipelineConfig::load(PipelineKind::Train, dir.path(), ConfigLoader::new()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_run_reports_and_snapshots() {
        let dir = TempDir::new().unwrap();
        write_config_dir(dir.path());
        let snapshot_dir = dir.path().join("snapshot");

        let config = PipelineConfig::load(PipelineKind::Train, dir.path(), ConfigLoader::new()).unwrap();
        let context = RunContext::with_run_id(PipelineKind::Train.name(), "run-1");
        let report = PipelineRunner::new(PipelineKind::Train, &context)
            .run(dir.path(), &config, Some(&snapshot_dir))
            .unwrap();

        assert_eq!(report.run_id, "run-1");
        assert!(report.validated);
        let snapshot = report.snapshot.unwrap();
        assert_eq!(snapshot.digest.len(), 64);
        assert!(snapshot_dir.join("config_hash.txt").is_file());
    }

    #[test]
    fn test_raw_pipeline_cannot_snapshot() {
        let dir = TempDir::new().unwrap();
        write_config_dir(dir.path());

        let config = PipelineConfig::load(PipelineKind::Retrain, dir.path(), ConfigLoader::new()).unwrap();
        let context = RunContext::new(PipelineKind::Retrain.name());
        let result = PipelineRunner::new(PipelineKind::Retrain, &context).run(
            dir.path(),
            &config,
            Some(&dir.path().join("snapshot")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_log_settings_for_raw_config_use_defaults() {
        let config = PipelineConfig::Raw(RawConfigBundle::new());
        let settings = config.log_settings(PipelineKind::Inference);
        assert_eq!(settings.file_name, "inference_pipeline.log");
        assert!(settings.log_dir.is_none());
    }
}
