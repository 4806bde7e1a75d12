//! Command-line interface

pub mod commands;
pub mod output;
pub mod types;

pub use output::{handle_error, output, CommandOutput};
pub use types::{Cli, Commands, ConfigCommands, ConfigDirArgs, PipelineArgs, TrainArgs};

use anyhow::Result;

use crate::application::PipelineKind;

/// Run the parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    match cli.command {
        Commands::Train(ref args) => commands::pipeline::execute(
            PipelineKind::Train,
            &args.pipeline,
            args.snapshot_dir.as_deref(),
            cli,
        ),
        Commands::Validate(ref args) => {
            commands::pipeline::execute(PipelineKind::Validate, args, None, cli)
        }
        Commands::Inference(ref args) => {
            commands::pipeline::execute(PipelineKind::Inference, args, None, cli)
        }
        Commands::Retrain(ref args) => {
            commands::pipeline::execute(PipelineKind::Retrain, args, None, cli)
        }
        Commands::Config(ref command) => commands::config::execute(command, cli),
    }
}
