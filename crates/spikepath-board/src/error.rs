//! Error types for board encoding and decoding

use thiserror::Error;

use spikepath_runtime::RuntimeError;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while building a board network or decoding its
/// spike raster
#[derive(Error, Debug)]
pub enum BoardError {
    /// Engine-layer error
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// Invalid board description
    #[error("Invalid board: {reason}")]
    InvalidBoard {
        /// Reason the description was rejected
        reason: String,
    },

    /// The simulation horizon was too short for the terminal cell to spike
    #[error("horizon of {steps} ticks too short: cell {cell} never spiked")]
    HorizonTooShort {
        /// The terminal cell index
        cell: u32,
        /// The configured horizon
        steps: u64,
    },

    /// No qualifying edge spiked where at least one was expected
    #[error("no move into cell {cell} spiked at tick {tick}: raster or topology is malformed")]
    MissingEdge {
        /// The cursor's cell
        cell: u32,
        /// The cursor's tick
        tick: u64,
    },

    /// A throw sequence does not replay on the board
    #[error("illegal replay: {reason}")]
    IllegalReplay {
        /// Reason the sequence was rejected
        reason: String,
    },
}

impl BoardError {
    /// Create an invalid board error
    pub fn invalid_board(reason: impl Into<String>) -> Self {
        Self::InvalidBoard {
            reason: reason.into(),
        }
    }

    /// Create an illegal replay error
    pub fn illegal_replay(reason: impl Into<String>) -> Self {
        Self::IllegalReplay {
            reason: reason.into(),
        }
    }
}
