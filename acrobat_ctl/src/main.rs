// acrobat_ctl/src/main.rs

use acrobat_ctl::{cli::Cli, logging, run_cli};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_filter.as_deref());

    match run_cli(&cli) {
        Ok(Some(summary)) => {
            info!(
                cycles = summary.cycles,
                degenerate = summary.degenerate,
                rejected = summary.rejected,
                "Input exhausted, shutting down."
            );
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
