//! Error handling for the spikepath CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Engine layer error
    #[error("Runtime error: {0}")]
    Runtime(#[from] spikepath_runtime::RuntimeError),

    /// Board layer error
    #[error("Board error: {0}")]
    Board(#[from] spikepath_board::BoardError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generic error
    #[error("Error: {0}")]
    Generic(#[from] anyhow::Error),
}
