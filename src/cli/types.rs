//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::config::{ConfigLoader, LoadPolicy};
use crate::infrastructure::logging::{LogFormat, LogSettings};

#[derive(Parser, Debug)]
#[command(name = "riskpipe")]
#[command(about = "Riskpipe - credit risk model pipelines", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Enable verbose (DEBUG) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Console log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Logger settings to use before (or without) a validated config.
    pub fn default_log_settings(&self) -> LogSettings {
        LogSettings::default()
            .verbose(self.verbose)
            .with_format(self.log_format)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the end-to-end model training pipeline
    Train(TrainArgs),

    /// Run the dataset and schema validation pipeline
    Validate(PipelineArgs),

    /// Run the inference pipeline
    Inference(PipelineArgs),

    /// Run the monitoring-triggered retraining pipeline
    Retrain(PipelineArgs),

    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigDirArgs {
    /// Path to the configuration directory containing YAML files
    #[arg(short, long, env = "RISKPIPE_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Load missing optional section files (features, tuning, evaluation, inference) as empty
    #[arg(long)]
    pub allow_missing_optional: bool,
}

impl ConfigDirArgs {
    pub const fn loader(&self) -> ConfigLoader {
        if self.allow_missing_optional {
            ConfigLoader::with_policy(LoadPolicy::RequiredOnly)
        } else {
            ConfigLoader::new()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    #[command(flatten)]
    pub config: ConfigDirArgs,

    /// Run identifier to tag logs with (generated when omitted)
    #[arg(long)]
    pub run_id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Write a config snapshot and digest into this directory before training
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Load and validate a configuration directory
    Check(ConfigDirArgs),

    /// Validate a configuration directory and write its snapshot
    Snapshot {
        #[command(flatten)]
        config: ConfigDirArgs,

        /// Output directory for the snapshot files
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Verify a snapshot directory against its recorded digest
    Verify {
        /// Directory holding config_snapshot.yaml and config_hash.txt
        #[arg(short, long)]
        snapshot_dir: PathBuf,
    },
}
