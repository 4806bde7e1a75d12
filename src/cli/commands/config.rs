//! Implementation of the `riskpipe config` commands.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::{Cli, ConfigCommands, ConfigDirArgs};
use crate::domain::models::ValidatedConfig;
use crate::infrastructure::config::{
    load_app_config_with, ConfigSnapshot, SnapshotRecord, SnapshotVerification,
};
use crate::infrastructure::logging::LoggerImpl;

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub success: bool,
    pub config_dir: PathBuf,
    pub digest: String,
    pub config: ValidatedConfig,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let config = &self.config;
        let logging = config.logging();
        [
            format!("Configuration valid: {}", self.config_dir.display()),
            format!(
                "  data:     {} -> {} (label window {} days)",
                config.data().raw_data_path(),
                config.data().processed_data_path(),
                config.data().label_window_days()
            ),
            format!(
                "  training: {} (random_state {})",
                config.training().model_type(),
                config.training().random_state()
            ),
            format!("  paths:    {}", config.paths().artifacts_root()),
            format!(
                "  logging:  {} (file logging {}, dir {})",
                logging.level(),
                if logging.enable_file() { "on" } else { "off" },
                logging.log_dir()
            ),
            format!("  digest:   {}", self.digest),
        ]
        .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct SnapshotOutput {
    pub success: bool,
    #[serde(flatten)]
    pub record: SnapshotRecord,
}

impl CommandOutput for SnapshotOutput {
    fn to_human(&self) -> String {
        format!(
            "Config snapshot written to {}\nDigest {} written to {}",
            self.record.snapshot_path.display(),
            self.record.digest,
            self.record.hash_path.display()
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyOutput {
    pub success: bool,
    pub snapshot_dir: PathBuf,
    #[serde(flatten)]
    pub verification: SnapshotVerification,
}

impl CommandOutput for VerifyOutput {
    fn to_human(&self) -> String {
        format!(
            "Snapshot {} verified: {}",
            self.snapshot_dir.display(),
            self.verification.actual
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(command: &ConfigCommands, cli: &Cli) -> Result<()> {
    let _logger = LoggerImpl::init(&cli.default_log_settings())?;

    let result = match command {
        ConfigCommands::Check(args) => check(args, cli.json),
        ConfigCommands::Snapshot {
            config,
            output: output_dir,
        } => snapshot(config, output_dir, cli.json),
        ConfigCommands::Verify { snapshot_dir } => verify(snapshot_dir, cli.json),
    };
    if let Err(ref err) = result {
        error!(error = %format!("{err:#}"), "config command failed");
    }
    result
}

fn load(args: &ConfigDirArgs) -> Result<ValidatedConfig> {
    load_app_config_with(&args.config_dir, args.loader()).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            args.config_dir.display()
        )
    })
}

fn check(args: &ConfigDirArgs, json_mode: bool) -> Result<()> {
    let config = load(args)?;
    let digest = ConfigSnapshot::digest(&config)?;
    output(
        &CheckOutput {
            success: true,
            config_dir: args.config_dir.clone(),
            digest,
            config,
        },
        json_mode,
    );
    Ok(())
}

fn snapshot(args: &ConfigDirArgs, output_dir: &Path, json_mode: bool) -> Result<()> {
    let config = load(args)?;
    let record = ConfigSnapshot::write(&config, output_dir)?;
    output(
        &SnapshotOutput {
            success: true,
            record,
        },
        json_mode,
    );
    Ok(())
}

fn verify(snapshot_dir: &Path, json_mode: bool) -> Result<()> {
    let verification = ConfigSnapshot::verify(snapshot_dir).with_context(|| {
        format!("Failed to verify snapshot in {}", snapshot_dir.display())
    })?;
    if !verification.matches() {
        bail!(
            "Config snapshot digest mismatch in {}: recorded {}, computed {}",
            snapshot_dir.display(),
            verification.expected,
            verification.actual
        );
    }

    output(
        &VerifyOutput {
            success: true,
            snapshot_dir: snapshot_dir.to_path_buf(),
            verification,
        },
        json_mode,
    );
    Ok(())
}
