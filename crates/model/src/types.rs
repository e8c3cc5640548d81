//! Core model types

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use walletguard_core::Amount;

use crate::ModelError;

/// Width of the classifier's input vector. Only the last slot (the amount)
/// is populated at scoring time; the rest stay zero.
pub const FEATURE_COUNT: usize = 30;

/// Decimal places kept when a probability enters decimal risk arithmetic
const DECIMAL_PLACES: u32 = 6;

/// A probability in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Result<Self, ModelError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidProbability(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The probability as a decimal, rounded to 6 places
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_f64(self.0)
            .unwrap_or_default()
            .round_dp(DECIMAL_PLACES)
    }
}

impl TryFrom<f64> for Probability {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> Self {
        p.0
    }
}

/// Fraud model - interface consumed by the risk blender
///
/// Implementations must be pure: the same amount always yields the same
/// probability, and estimating never mutates observable state.
///
/// - LogisticModel: pre-fit scaler + logistic regression
/// - ConstantModel: fixed output for tests
pub trait FraudModel: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Positive-class (fraud) probability for a transfer of `amount`
    fn estimate(&self, amount: Amount) -> Result<Probability, ModelError>;
}

impl<M: FraudModel + ?Sized> FraudModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn estimate(&self, amount: Amount) -> Result<Probability, ModelError> {
        (**self).estimate(amount)
    }
}
