//! Session errors

use thiserror::Error;
use walletguard_engine::{EngineError, ValidationError};
use walletguard_model::ModelError;

/// Errors from the wallet session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Bad user input; nothing was mutated
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// `verify_challenge` called with no open challenge
    #[error("No challenge pending")]
    NoChallengePending,

    /// `submit_transaction` called while a challenge awaits verification
    #[error("A challenge is pending; verify it before submitting another transfer")]
    ChallengeOutstanding,

    /// The fraud model failed and the fail policy refused to decide
    #[error("Fraud model failed: {0}")]
    Model(ModelError),

    #[error("Risk engine error: {0}")]
    Engine(EngineError),

    #[error("Decision journal error: {0}")]
    Journal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<EngineError> for SessionError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Model(m) => SessionError::Model(m),
            other => SessionError::Engine(other),
        }
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
