// acrobat_ctl/src/lib.rs

//! The process around the control library: configuration from disk, logging,
//! pose samples in, pulse widths out.

use acrobat_core::pipeline::ControlPipeline;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::info;

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod runner;
pub mod sink;

use crate::cli::Cli;
use crate::error::CtlError;
use crate::input::SampleParser;
use crate::runner::RunSummary;
use crate::sink::WriterSink;

/// Everything `main` does after logging is up. Returns `None` when the run
/// only printed the configuration.
pub fn run_cli(cli: &Cli) -> Result<Option<RunSummary>, CtlError> {
    let mission = config::load_mission_config(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", config::render(&mission)?);
        return Ok(None);
    }

    // Fatal configuration problems surface here, before any sample is read.
    let pipeline = ControlPipeline::from_config(&mission)?;
    let parser = SampleParser::new(cli.attitude, cli.marker_frame);

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            info!("Reading pose samples from: {}", path.display());
            Box::new(BufReader::new(File::open(path)?))
        }
        None => {
            info!("Reading pose samples from stdin.");
            Box::new(io::stdin().lock())
        }
    };

    let mut sink = WriterSink::new(io::stdout().lock());
    let summary = runner::run(&pipeline, &mission.vehicle, &parser, reader, &mut sink)?;

    if sink.saturated_count() > 0 {
        info!("{} command(s) were saturated to the ESC range.", sink.saturated_count());
    }
    Ok(Some(summary))
}
