//! Transfer request validation

use rust_decimal::Decimal;
use walletguard_core::{Amount, Destination};

use crate::error::ValidationError;

/// A validated transfer: `0 < amount <= balance`, non-empty destination.
///
/// Because `balance >= amount > 0`, the balance snapshot is always positive,
/// which is what keeps the drain ratio in the rule evaluator well defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub amount: Amount,
    pub destination: Destination,
    /// Balance at submission time
    pub balance: Amount,
}

impl TransactionRequest {
    /// Validate raw caller input against the current balance.
    ///
    /// Checks run in the order the sender sees them: destination, amount,
    /// then funds.
    pub fn validate(
        amount: Decimal,
        destination: &str,
        balance: Amount,
    ) -> Result<Self, ValidationError> {
        let destination =
            Destination::new(destination).map_err(|_| ValidationError::EmptyDestination)?;

        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        let amount = Amount::new_unchecked(amount);

        if amount > balance {
            return Err(ValidationError::InsufficientBalance {
                available: balance,
                requested: amount,
            });
        }

        Ok(Self {
            amount,
            destination,
            balance,
        })
    }
}
