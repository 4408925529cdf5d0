//! Backward spike-raster decoding
//!
//! The decoder consumes a finished [`SpikeTrace`] and reconstructs the
//! throw sequence(s) that produced the terminal cell's earliest spike. It
//! walks backward one tick per move: at each cursor it scans the edge
//! rows targeting the current cell for a spike at the current tick,
//! resolves the move's source through the board's jump table, and steps
//! the cursor there.
//!
//! When several edges qualify at once the histories are equally short.
//! Single-path decoding resolves the tie deterministically (snake over
//! ladder over plain move, row order within a kind); all-paths decoding
//! branches over an explicit work-list of cursors, each carrying its own
//! raster snapshot and partial throw/log lists.

use ndarray::Array2;
use serde::Serialize;

use crate::board::{Board, EdgeKind};
use crate::encode::{SpikeTrace, TargetMeta};
use crate::error::*;

/// A decoded move sequence with its human-readable log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Die throws in forward play order
    pub throws: Vec<u32>,
    /// One log line per throw, in forward play order
    pub log: Vec<String>,
}

/// Decode the single highest-priority shortest move sequence.
pub fn decode_single(trace: &SpikeTrace, board: &Board) -> Result<Solution> {
    let (terminal_row, terminal) = find_terminal(trace)?;
    let t0 = arrival_tick(trace, terminal_row, terminal)?;
    log::info!("terminal cell {} first spiked at tick {}", terminal, t0);

    let mut cell = terminal;
    let mut tick = t0;
    let mut throws = Vec::new();
    let mut log = Vec::new();
    while !(cell == 0 && tick == 0) {
        if tick == 0 {
            return Err(BoardError::MissingEdge { cell, tick });
        }
        let cands = candidates(&trace.matrix, &trace.meta, cell, tick);
        let chosen = *cands
            .first()
            .ok_or(BoardError::MissingEdge { cell, tick })?;
        let step = apply_edge(board, &trace.meta[chosen], cell)?;
        throws.push(step.dice);
        log.push(step.line);
        cell = step.prev;
        tick -= 1;
    }
    throws.reverse();
    log.reverse();
    Ok(Solution { throws, log })
}

/// Decode every shortest move sequence.
///
/// Each genuine ambiguity forks the search: per qualifying edge, the
/// raster snapshot is cloned with the competing bits in that column
/// cleared, and the branch continues on its own copy. Termination is
/// guaranteed because the tick strictly decreases at every step.
pub fn decode_all(trace: &SpikeTrace, board: &Board) -> Result<Vec<Solution>> {
    let (terminal_row, terminal) = find_terminal(trace)?;
    let t0 = arrival_tick(trace, terminal_row, terminal)?;
    log::info!(
        "terminal cell {} first spiked at tick {}; enumerating histories",
        terminal,
        t0
    );

    let mut solutions = Vec::new();
    let mut work = vec![Cursor {
        matrix: trace.matrix.clone(),
        cell: terminal,
        tick: t0,
        throws: Vec::new(),
        log: Vec::new(),
    }];

    while let Some(mut cur) = work.pop() {
        loop {
            if cur.cell == 0 && cur.tick == 0 {
                let mut throws = cur.throws;
                let mut log = cur.log;
                throws.reverse();
                log.reverse();
                solutions.push(Solution { throws, log });
                break;
            }
            if cur.tick == 0 {
                return Err(BoardError::MissingEdge {
                    cell: cur.cell,
                    tick: 0,
                });
            }
            let cands = candidates(&cur.matrix, &trace.meta, cur.cell, cur.tick);
            match cands.len() {
                0 => {
                    return Err(BoardError::MissingEdge {
                        cell: cur.cell,
                        tick: cur.tick,
                    })
                }
                1 => {
                    let step = apply_edge(board, &trace.meta[cands[0]], cur.cell)?;
                    cur.throws.push(step.dice);
                    cur.log.push(step.line);
                    cur.cell = step.prev;
                    cur.tick -= 1;
                }
                _ => {
                    // Push branches in reverse priority so the
                    // highest-priority history is completed first.
                    for &chosen in cands.iter().rev() {
                        let mut matrix = cur.matrix.clone();
                        for &other in &cands {
                            if other != chosen {
                                matrix[[other, cur.tick as usize]] = 0;
                            }
                        }
                        let step = apply_edge(board, &trace.meta[chosen], cur.cell)?;
                        let mut throws = cur.throws.clone();
                        let mut log = cur.log.clone();
                        throws.push(step.dice);
                        log.push(step.line);
                        work.push(Cursor {
                            matrix,
                            cell: step.prev,
                            tick: cur.tick - 1,
                            throws,
                            log,
                        });
                    }
                    break;
                }
            }
        }
    }

    log::info!("found {} shortest histories", solutions.len());
    Ok(solutions)
}

/// One in-flight backward walk
#[derive(Debug, Clone)]
struct Cursor {
    matrix: Array2<u8>,
    cell: u32,
    tick: u64,
    throws: Vec<u32>,
    log: Vec<String>,
}

/// One resolved backward step
struct EdgeStep {
    prev: u32,
    dice: u32,
    line: String,
}

fn find_terminal(trace: &SpikeTrace) -> Result<(usize, u32)> {
    trace
        .meta
        .iter()
        .enumerate()
        .filter_map(|(row, m)| match m {
            TargetMeta::Cell { index } => Some((row, *index)),
            _ => None,
        })
        .max_by_key(|&(_, index)| index)
        .ok_or_else(|| BoardError::invalid_board("trace contains no cell rows"))
}

fn arrival_tick(trace: &SpikeTrace, row: usize, cell: u32) -> Result<u64> {
    trace
        .matrix
        .row(row)
        .iter()
        .position(|&b| b != 0)
        .map(|t| t as u64)
        .ok_or(BoardError::HorizonTooShort {
            cell,
            steps: trace.matrix.ncols() as u64,
        })
}

fn kind_rank(kind: EdgeKind) -> u8 {
    match kind {
        EdgeKind::Snake => 0,
        EdgeKind::Ladder => 1,
        EdgeKind::Plain => 2,
    }
}

/// Edge rows targeting `cell` that spiked at `tick`, highest priority
/// first (snake over ladder over plain, row order within a kind).
fn candidates(matrix: &Array2<u8>, meta: &[TargetMeta], cell: u32, tick: u64) -> Vec<usize> {
    let mut rows: Vec<usize> = meta
        .iter()
        .enumerate()
        .filter(|(row, m)| {
            matches!(m, TargetMeta::Edge { target, .. } if *target == cell)
                && matrix[[*row, tick as usize]] != 0
        })
        .map(|(row, _)| row)
        .collect();
    rows.sort_by_key(|&row| {
        let rank = match meta[row] {
            TargetMeta::Edge { kind, .. } => kind_rank(kind),
            TargetMeta::Cell { .. } => u8::MAX,
        };
        (rank, row)
    });
    rows
}

fn apply_edge(board: &Board, meta: &TargetMeta, cell: u32) -> Result<EdgeStep> {
    let TargetMeta::Edge { kind, dice, .. } = meta else {
        return Err(BoardError::invalid_board(
            "cell row selected as a move edge",
        ));
    };
    let (landing, jump_note) = match kind {
        EdgeKind::Plain => (cell, None),
        EdgeKind::Ladder => {
            let jump = board.ladder_with_end(cell).ok_or_else(|| {
                BoardError::invalid_board(format!("no ladder ends at cell {}", cell))
            })?;
            (jump.start, Some(format!(", ladder up to cell {}", cell)))
        }
        EdgeKind::Snake => {
            let jump = board.snake_with_end(cell).ok_or_else(|| {
                BoardError::invalid_board(format!("no snake ends at cell {}", cell))
            })?;
            (jump.start, Some(format!(", snake down to cell {}", cell)))
        }
    };
    let prev = landing as i64 - *dice as i64;
    if prev < 0 {
        return Err(BoardError::invalid_board(format!(
            "throw {} into cell {} implies a source before the board start",
            dice, landing
        )));
    }
    let line = format!(
        "throw {}: cell {} -> cell {}{}",
        dice,
        prev,
        landing,
        jump_note.unwrap_or_default()
    );
    Ok(EdgeStep {
        prev: prev as u32,
        dice: *dice,
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A hand-built trace where a snake edge, a ladder edge, and a plain
    /// edge into cell 5 all spiked on the arrival tick.
    fn tie_break_fixture() -> (SpikeTrace, Board) {
        let board = Board::from_pairs(9, 4, &[(2, 5)], &[(7, 5)]).unwrap();
        let meta = vec![
            TargetMeta::Cell { index: 0 },
            TargetMeta::Cell { index: 5 },
            TargetMeta::Edge {
                kind: EdgeKind::Ladder,
                target: 5,
                dice: 1,
            },
            TargetMeta::Edge {
                kind: EdgeKind::Snake,
                target: 5,
                dice: 4,
            },
            TargetMeta::Edge {
                kind: EdgeKind::Plain,
                target: 5,
                dice: 1,
            },
            TargetMeta::Edge {
                kind: EdgeKind::Plain,
                target: 3,
                dice: 3,
            },
        ];
        let labels = vec![
            "B0".to_string(),
            "B5".to_string(),
            "L5-D1".to_string(),
            "S5-D4".to_string(),
            "P5-D1".to_string(),
            "P3-D3".to_string(),
        ];
        let mut matrix = Array2::zeros((6, 3));
        matrix[[0, 0]] = 1; // B0 at tick 0
        matrix[[1, 2]] = 1; // B5 arrival at tick 2
        matrix[[2, 2]] = 1; // L5-D1
        matrix[[3, 2]] = 1; // S5-D4
        matrix[[4, 2]] = 1; // P5-D1
        matrix[[5, 1]] = 1; // P3-D3 at tick 1
        (
            SpikeTrace {
                matrix,
                labels,
                meta,
            },
            board,
        )
    }

    #[test]
    fn test_snake_wins_tie_break() {
        let (trace, board) = tie_break_fixture();
        let solution = decode_single(&trace, &board).unwrap();
        // The snake edge S5-D4 resolves to source 3 via snake 7 -> 5.
        assert_eq!(solution.throws, vec![3, 4]);
        assert!(solution.log[1].contains("snake down to cell 5"));
    }

    #[test]
    fn test_missing_edge_is_an_error() {
        let (mut trace, board) = tie_break_fixture();
        // Remove the only edge into cell 3; the walk dead-ends at tick 1.
        trace.matrix[[5, 1]] = 0;
        let err = decode_single(&trace, &board);
        assert!(matches!(
            err,
            Err(BoardError::MissingEdge { cell: 3, tick: 1 })
        ));
    }

    #[test]
    fn test_silent_terminal_is_horizon_error() {
        let (mut trace, board) = tie_break_fixture();
        trace.matrix[[1, 2]] = 0;
        let err = decode_single(&trace, &board);
        assert!(matches!(
            err,
            Err(BoardError::HorizonTooShort { cell: 5, steps: 3 })
        ));
    }
}
