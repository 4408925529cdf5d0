//! Board description and move-graph construction
//!
//! A board is a line of positions `0..=cells` (0 is the start, `cells` the
//! terminal), a die, and two jump lists. The move graph is built in three
//! passes: base die moves, then ladder splicing, then snake splicing. A
//! move into a jump start is redirected to the jump end and tagged with
//! the jump kind; moves out of a jump start are dropped (the position is
//! never rested on).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::*;

/// A ladder or snake: land on `start`, get moved to `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jump {
    /// The position that triggers the jump
    pub start: u32,
    /// The position the jump moves to
    pub end: u32,
}

/// The kind of move that reaches a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// A plain die move
    Plain,
    /// A die move that landed on a ladder start
    Ladder,
    /// A die move that landed on a snake start
    Snake,
}

impl EdgeKind {
    /// One-letter label prefix for this kind
    pub fn prefix(&self) -> char {
        match self {
            EdgeKind::Plain => 'P',
            EdgeKind::Ladder => 'L',
            EdgeKind::Snake => 'S',
        }
    }
}

/// One edge of the move graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Source position
    pub from: u32,
    /// Destination position, after any jump
    pub to: u32,
    /// The die value that makes the move
    pub dice: u32,
    /// How the destination was reached
    pub kind: EdgeKind,
}

/// A snakes-and-ladders board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: u32,
    dice_sides: u32,
    ladders: Vec<Jump>,
    snakes: Vec<Jump>,
}

impl Board {
    /// Create a board with validation.
    ///
    /// `cells` is the terminal position index; positions run `0..=cells`.
    /// Jump starts must be interior positions, distinct from each other,
    /// and distinct from every jump end (chained jumps cannot be spliced
    /// into the move graph). Ladders must go forward, snakes backward.
    /// A ladder and a snake may share an end position.
    pub fn new(
        cells: u32,
        dice_sides: u32,
        ladders: Vec<Jump>,
        snakes: Vec<Jump>,
    ) -> Result<Self> {
        if cells < 1 {
            return Err(BoardError::invalid_board("cells must be >= 1"));
        }
        if dice_sides < 1 {
            return Err(BoardError::invalid_board("dice_sides must be >= 1"));
        }
        for j in &ladders {
            if j.start < 1 || j.start >= cells {
                return Err(BoardError::invalid_board(format!(
                    "ladder start {} outside 1..{}",
                    j.start, cells
                )));
            }
            if j.end <= j.start || j.end > cells {
                return Err(BoardError::invalid_board(format!(
                    "ladder {}:{} must go forward to at most {}",
                    j.start, j.end, cells
                )));
            }
        }
        for j in &snakes {
            if j.start < 1 || j.start >= cells {
                return Err(BoardError::invalid_board(format!(
                    "snake start {} outside 1..{}",
                    j.start, cells
                )));
            }
            if j.end >= j.start || j.end < 1 {
                return Err(BoardError::invalid_board(format!(
                    "snake {}:{} must go backward to at least 1",
                    j.start, j.end
                )));
            }
        }

        let starts: Vec<u32> = ladders
            .iter()
            .chain(snakes.iter())
            .map(|j| j.start)
            .collect();
        for (i, s) in starts.iter().enumerate() {
            if starts[i + 1..].contains(s) {
                return Err(BoardError::invalid_board(format!(
                    "cell {} is the start of more than one jump",
                    s
                )));
            }
        }
        let ladder_ends: Vec<u32> = ladders.iter().map(|j| j.end).collect();
        for (i, e) in ladder_ends.iter().enumerate() {
            if ladder_ends[i + 1..].contains(e) {
                return Err(BoardError::invalid_board(format!(
                    "cell {} is the end of more than one ladder",
                    e
                )));
            }
        }
        let snake_ends: Vec<u32> = snakes.iter().map(|j| j.end).collect();
        for (i, e) in snake_ends.iter().enumerate() {
            if snake_ends[i + 1..].contains(e) {
                return Err(BoardError::invalid_board(format!(
                    "cell {} is the end of more than one snake",
                    e
                )));
            }
        }
        for j in ladders.iter().chain(snakes.iter()) {
            if starts.contains(&j.end) {
                return Err(BoardError::invalid_board(format!(
                    "jump end {} is also a jump start (chained jumps are not supported)",
                    j.end
                )));
            }
        }

        Ok(Self {
            cells,
            dice_sides,
            ladders,
            snakes,
        })
    }

    /// Build a board from raw (start, end) pairs.
    pub fn from_pairs(
        cells: u32,
        dice_sides: u32,
        ladders: &[(u32, u32)],
        snakes: &[(u32, u32)],
    ) -> Result<Self> {
        Self::new(
            cells,
            dice_sides,
            ladders.iter().map(|&(start, end)| Jump { start, end }).collect(),
            snakes.iter().map(|&(start, end)| Jump { start, end }).collect(),
        )
    }

    /// The terminal position index
    pub fn cells(&self) -> u32 {
        self.cells
    }

    /// Number of die faces
    pub fn dice_sides(&self) -> u32 {
        self.dice_sides
    }

    /// The ladders
    pub fn ladders(&self) -> &[Jump] {
        &self.ladders
    }

    /// The snakes
    pub fn snakes(&self) -> &[Jump] {
        &self.snakes
    }

    /// The ladder arriving at `end`, if any
    pub fn ladder_with_end(&self, end: u32) -> Option<&Jump> {
        self.ladders.iter().find(|j| j.end == end)
    }

    /// The snake arriving at `end`, if any
    pub fn snake_with_end(&self, end: u32) -> Option<&Jump> {
        self.snakes.iter().find(|j| j.end == end)
    }

    /// A simulation horizon always long enough for the terminal cell to
    /// spike: every move advances the wavefront one tick, and no shortest
    /// path revisits a position, so `cells` throws bound the arrival.
    pub fn default_horizon(&self) -> u64 {
        self.cells as u64 + 1
    }

    fn base_connections(&self) -> Vec<Connection> {
        let mut connections = Vec::new();
        for from in 0..self.cells {
            for dice in 1..=self.dice_sides {
                let to = from + dice;
                if to <= self.cells {
                    connections.push(Connection {
                        from,
                        to,
                        dice,
                        kind: EdgeKind::Plain,
                    });
                }
            }
        }
        connections
    }

    fn splice_jumps(
        connections: Vec<Connection>,
        jumps: &[Jump],
        kind: EdgeKind,
    ) -> Vec<Connection> {
        connections
            .into_iter()
            .filter_map(|con| {
                if let Some(jump) = jumps.iter().find(|j| j.start == con.to) {
                    Some(Connection {
                        to: jump.end,
                        kind,
                        ..con
                    })
                } else if jumps.iter().any(|j| j.start == con.from) {
                    None
                } else {
                    Some(con)
                }
            })
            .collect()
    }

    /// The full move graph: base die moves with ladders, then snakes,
    /// spliced in.
    pub fn connections(&self) -> Vec<Connection> {
        let base = self.base_connections();
        let with_ladders = Self::splice_jumps(base, &self.ladders, EdgeKind::Ladder);
        Self::splice_jumps(with_ladders, &self.snakes, EdgeKind::Snake)
    }

    /// Replay a throw sequence from the start cell, applying jumps, and
    /// return the landing position.
    pub fn replay(&self, throws: &[u32]) -> Result<u32> {
        let mut pos = 0u32;
        for &throw in throws {
            if throw < 1 || throw > self.dice_sides {
                return Err(BoardError::illegal_replay(format!(
                    "throw {} outside 1..={}",
                    throw, self.dice_sides
                )));
            }
            let mut next = pos + throw;
            if next > self.cells {
                return Err(BoardError::illegal_replay(format!(
                    "throw {} from cell {} overshoots cell {}",
                    throw, pos, self.cells
                )));
            }
            if let Some(j) = self.ladders.iter().chain(self.snakes.iter()).find(|j| j.start == next)
            {
                next = j.end;
            }
            pos = next;
        }
        Ok(pos)
    }

    /// Minimum number of throws from start to terminal, by breadth-first
    /// search over the move graph. `None` if the terminal is unreachable.
    pub fn min_throws(&self) -> Option<u32> {
        let connections = self.connections();
        let mut dist: Vec<Option<u32>> = vec![None; self.cells as usize + 1];
        dist[0] = Some(0);
        let mut queue = VecDeque::from([0u32]);
        while let Some(pos) = queue.pop_front() {
            let Some(d) = dist[pos as usize] else {
                continue;
            };
            if pos == self.cells {
                return Some(d);
            }
            for con in connections.iter().filter(|c| c.from == pos) {
                if dist[con.to as usize].is_none() {
                    dist[con.to as usize] = Some(d + 1);
                    queue.push_back(con.to);
                }
            }
        }
        dist[self.cells as usize]
    }
}
