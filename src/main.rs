//! Riskpipe CLI entry point.

use clap::Parser;

use riskpipe::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::run(&cli) {
        cli::handle_error(&err, cli.json);
    }
}
