//! Implementation of the `riskpipe train|validate|inference|retrain` commands.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::error;

use crate::application::{PipelineConfig, PipelineKind, PipelineReport, PipelineRunner};
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::{Cli, PipelineArgs};
use crate::infrastructure::logging::{LoggerImpl, RunContext};

#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    pub success: bool,
    #[serde(flatten)]
    pub report: PipelineReport,
}

impl CommandOutput for PipelineOutput {
    fn to_human(&self) -> String {
        let report = &self.report;
        let mut lines = vec![format!(
            "{} pipeline finished (run {})",
            report.pipeline.title(),
            report.run_id
        )];
        let sections: Vec<&str> = report.sections.iter().map(|s| s.as_str()).collect();
        lines.push(format!("  config:   {}", report.config_dir.display()));
        lines.push(format!("  sections: {}", sections.join(", ")));
        lines.push(format!("  validated: {}", report.validated));
        if let Some(ref snapshot) = report.snapshot {
            lines.push(format!("  snapshot: {}", snapshot.snapshot_path.display()));
            lines.push(format!("  digest:   {}", snapshot.digest));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(
    kind: PipelineKind,
    args: &PipelineArgs,
    snapshot_dir: Option<&Path>,
    cli: &Cli,
) -> Result<()> {
    let config_dir = &args.config.config_dir;

    let config = match PipelineConfig::load(kind, config_dir, args.config.loader()) {
        Ok(config) => config,
        Err(err) => {
            // No validated logging section to configure from; report with defaults.
            let _logger = LoggerImpl::init(&cli.default_log_settings()).ok();
            error!(pipeline = %kind, error = %err, "Failed to load configuration");
            return Err(err).context("Failed to load configuration");
        }
    };

    let settings = config
        .log_settings(kind)
        .verbose(cli.verbose)
        .with_format(cli.log_format);
    let _logger = LoggerImpl::init(&settings)?;

    let context = match args.run_id {
        Some(ref run_id) => RunContext::with_run_id(kind.name(), run_id.as_str()),
        None => RunContext::new(kind.name()),
    };

    let report = PipelineRunner::new(kind, &context)
        .run(config_dir, &config, snapshot_dir)
        .inspect_err(|err| {
            error!(pipeline = %kind, run_id = %context.run_id(), error = %format!("{err:#}"), "pipeline run failed");
        })?;
    output(
        &PipelineOutput {
            success: true,
            report,
        },
        cli.json,
    );
    Ok(())
}
