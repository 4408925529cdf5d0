//! Error types for the simulation engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that can occur in the simulation engine
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Invalid network or simulator configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason for invalid configuration
        reason: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Node not found
    #[error("Node {node_id} not found")]
    NodeNotFound {
        /// Node ID that was not found
        node_id: u32,
    },

    /// Duplicate node label
    #[error("Node label {label:?} already exists")]
    DuplicateLabel {
        /// The offending label
        label: String,
    },
}

impl RuntimeError {
    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }
}
