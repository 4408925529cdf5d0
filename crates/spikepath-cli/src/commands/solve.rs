//! Solve a board via spike-timing simulation

use clap::Args;
use tracing::info;

use spikepath_board::{decode_all, decode_single, BoardNetwork, Solution, SpikeTrace};

use crate::commands::BoardArgs;
use crate::error::CliResult;

/// Simulate a board and decode its shortest throw sequence(s)
#[derive(Args, Debug)]
pub struct SolveCommand {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Simulation horizon in ticks (defaults to cells + 1)
    #[arg(long)]
    pub steps: Option<u64>,

    /// Enumerate every shortest throw sequence
    #[arg(long)]
    pub all: bool,

    /// RNG seed for the simulation
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Emit the solution(s) as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the spike raster after solving
    #[arg(long)]
    pub show_raster: bool,
}

impl SolveCommand {
    /// Execute the solve command
    pub fn execute(self) -> CliResult<()> {
        let board = self.board.to_board()?;
        let steps = self.steps.unwrap_or_else(|| board.default_horizon());
        info!(
            "solving {} cells with a {}-sided die over {} ticks",
            board.cells(),
            board.dice_sides(),
            steps
        );

        let mut encoded = BoardNetwork::build(&board)?;
        let trace = encoded.simulate(steps, self.seed)?;

        let solutions = if self.all {
            decode_all(&trace, &board)?
        } else {
            vec![decode_single(&trace, &board)?]
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&solutions)?);
        } else {
            for (i, solution) in solutions.iter().enumerate() {
                if solutions.len() > 1 {
                    println!("solution {}:", i + 1);
                }
                print_solution(solution);
            }
        }

        if self.show_raster {
            print_raster(&trace);
        }

        Ok(())
    }
}

fn print_solution(solution: &Solution) {
    let throws: Vec<String> = solution.throws.iter().map(u32::to_string).collect();
    println!("throws: {}", throws.join(", "));
    for line in &solution.log {
        println!("  {}", line);
    }
}

fn print_raster(trace: &SpikeTrace) {
    let width = trace.labels.iter().map(|l| l.len()).max().unwrap_or(0);
    for (row, label) in trace.labels.iter().enumerate() {
        let bits: String = trace
            .matrix
            .row(row)
            .iter()
            .map(|&b| if b != 0 { '#' } else { '.' })
            .collect();
        println!("{:>width$} | {}", label, bits, width = width);
    }
}
