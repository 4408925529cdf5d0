//! CLI command implementations for spikepath

use clap::{Args, Parser, Subcommand};

use spikepath_board::Board;

use crate::error::CliResult;

pub mod export;
pub mod solve;

/// spikepath - spike-timing shortest-path solver
#[derive(Parser, Debug)]
#[command(
    name = "spikepath",
    version,
    about = "Solve snakes-and-ladders boards on a spiking neural substrate",
    long_about = "spikepath lowers a snakes-and-ladders board onto a spiking neural \
                  network, runs a fixed-horizon lock-step simulation, and decodes the \
                  spike raster backward in time into the shortest throw sequence - or \
                  every equally-short sequence."
)]
pub struct SpikepathCli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate a board and decode its shortest throw sequence(s)
    Solve(solve::SolveCommand),

    /// Print the board network as interchange text
    Export(export::ExportCommand),
}

impl SpikepathCli {
    /// Execute the CLI command
    pub fn execute(self) -> CliResult<()> {
        match self.command {
            Commands::Solve(cmd) => cmd.execute(),
            Commands::Export(cmd) => cmd.execute(),
        }
    }
}

/// Board description flags shared by the subcommands
#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Terminal cell index (positions run 0..=cells)
    #[arg(long, default_value_t = 10)]
    pub cells: u32,

    /// Number of die faces
    #[arg(long, default_value_t = 4)]
    pub dice_sides: u32,

    /// Ladder as start:end (repeat the flag for several)
    #[arg(long = "ladder", value_name = "START:END", value_parser = parse_jump)]
    pub ladders: Vec<(u32, u32)>,

    /// Snake as start:end (repeat the flag for several)
    #[arg(long = "snake", value_name = "START:END", value_parser = parse_jump)]
    pub snakes: Vec<(u32, u32)>,
}

impl BoardArgs {
    /// Validate the flags into a board description
    pub fn to_board(&self) -> CliResult<Board> {
        Ok(Board::from_pairs(
            self.cells,
            self.dice_sides,
            &self.ladders,
            &self.snakes,
        )?)
    }
}

fn parse_jump(s: &str) -> Result<(u32, u32), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got {:?}", s))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("bad jump start in {:?}: {}", s, e))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("bad jump end in {:?}: {}", s, e))?;
    Ok((start, end))
}
