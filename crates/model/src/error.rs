//! Model adapter errors

use thiserror::Error;

/// Errors raised while loading or evaluating a fraud model
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model could not produce an estimate
    #[error("Fraud model unavailable: {0}")]
    Unavailable(String),

    /// Output outside [0, 1] or not finite
    #[error("Invalid probability: {0}")]
    InvalidProbability(f64),

    #[error("Model input is not representable: {0}")]
    InvalidInput(String),

    /// A parameter vector does not match the feature layout
    #[error("Dimension mismatch for {field}: expected {expected}, got {actual}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid model parameter {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
