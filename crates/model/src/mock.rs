//! Constant model for testing
//!
//! Returns the same probability for every amount, or always fails when built
//! with [`ConstantModel::unavailable`].

use walletguard_core::Amount;

use crate::error::ModelError;
use crate::types::{FraudModel, Probability};

/// Fixed-output fraud model
#[derive(Debug, Clone)]
pub struct ConstantModel {
    output: Option<Probability>,
}

impl ConstantModel {
    pub fn new(probability: f64) -> Result<Self, ModelError> {
        Ok(Self {
            output: Some(Probability::new(probability)?),
        })
    }

    /// A model whose every estimate fails with `ModelError::Unavailable`
    pub fn unavailable() -> Self {
        Self { output: None }
    }
}

impl FraudModel for ConstantModel {
    fn name(&self) -> &str {
        "constant"
    }

    fn estimate(&self, _amount: Amount) -> Result<Probability, ModelError> {
        self.output
            .ok_or_else(|| ModelError::Unavailable("constant model configured as unavailable".to_string()))
    }
}
