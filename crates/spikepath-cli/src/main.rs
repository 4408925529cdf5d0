//! # spikepath CLI
//!
//! Solve snakes-and-ladders boards on a spiking neural substrate: the
//! board is lowered onto a network, simulated in lock-step discrete
//! time, and the spike raster is decoded backward into the shortest
//! throw sequence(s).

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod error;

use commands::SpikepathCli;
use error::CliResult;

fn main() -> CliResult<()> {
    let cli = SpikepathCli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    if let Err(err) = cli.execute() {
        error!("Command failed: {}", err);
        std::process::exit(1);
    }

    Ok(())
}
