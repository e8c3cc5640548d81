//! Risk engine errors

use thiserror::Error;
use walletguard_core::Amount;
use walletguard_model::ModelError;

/// Errors from the Risk Engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Drain ratio is undefined; submissions are gated on `amount <= balance`
    /// with `amount > 0`, so this only fires if that gate was bypassed
    #[error("Cannot evaluate drain ratio against a zero balance")]
    ZeroBalance,

    #[error("Debit of {requested} exceeds balance {available}")]
    Overdraft { available: Amount, requested: Amount },

    #[error("Fraud model failed: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// User-input problems with a submitted transfer. Nothing is mutated when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter destination address")]
    EmptyDestination,

    #[error("Enter valid amount")]
    NonPositiveAmount,

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: Amount, requested: Amount },
}
