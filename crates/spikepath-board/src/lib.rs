//! Snakes-and-ladders solving on a spiking substrate
//!
//! A board is lowered onto a spiking network (one node per position, one
//! readout per move), simulated for a fixed horizon on the spikepath
//! engine, and the resulting spike raster is decoded backward in time
//! into the shortest throw sequence — or, on request, into every
//! equally-short throw sequence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod board;
pub mod decode;
pub mod encode;
pub mod error;

pub use board::{Board, Connection, EdgeKind, Jump};
pub use decode::{decode_all, decode_single, Solution};
pub use encode::{BoardNetwork, SpikeTrace, TargetMeta};
pub use error::{BoardError, Result};

/// Build, simulate, and decode a board in one call, returning the single
/// highest-priority shortest throw sequence.
pub fn solve(board: &Board, steps: u64, seed: u64) -> Result<Solution> {
    let mut encoded = BoardNetwork::build(board)?;
    let trace = encoded.simulate(steps, seed)?;
    decode_single(&trace, board)
}

/// Build, simulate, and decode a board in one call, returning every
/// shortest throw sequence.
pub fn solve_all(board: &Board, steps: u64, seed: u64) -> Result<Vec<Solution>> {
    let mut encoded = BoardNetwork::build(board)?;
    let trace = encoded.simulate(steps, seed)?;
    decode_all(&trace, board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_reference_board() {
        let board = Board::from_pairs(9, 4, &[(2, 6)], &[(8, 3)]).unwrap();
        let solution = solve(&board, board.default_horizon(), 0).unwrap();
        assert_eq!(board.replay(&solution.throws).unwrap(), 9);
    }
}
