//! Per-session wallet memory
//!
//! Holds the spendable balance, the destination of every accepted submission
//! and the cumulative amount sent to each destination. History and totals are
//! only ever updated together by [`WalletMemory::record_destination`], so the
//! distinct destinations in the history are exactly the keys of the totals.

use std::collections::HashMap;
use walletguard_core::{Amount, Destination};

use crate::error::{EngineError, EngineResult};

/// In-memory state the rule evaluator reads and the session mutates
#[derive(Debug, Clone, Default)]
pub struct WalletMemory {
    /// Current spendable amount
    balance: Amount,
    /// Destination of every recorded submission, in order
    history: Vec<Destination>,
    /// Cumulative amount per destination
    destination_totals: HashMap<Destination, Amount>,
}

impl WalletMemory {
    /// Empty memory with the given opening balance
    pub fn new(balance: Amount) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    /// Append `dest` to the history and add `amount` to its running total.
    pub fn record_destination(&mut self, dest: &Destination, amount: Amount) {
        self.history.push(dest.clone());
        let total = self
            .destination_totals
            .entry(dest.clone())
            .or_insert(Amount::ZERO);
        *total = match total.checked_add(&amount) {
            Some(sum) => sum,
            None => {
                tracing::warn!(
                    destination = %dest,
                    total = %total,
                    amount = %amount,
                    "Destination total overflowed, saturating at Decimal::MAX"
                );
                Amount::new_unchecked(rust_decimal::Decimal::MAX)
            }
        };
    }

    /// True iff nothing has ever been recorded for `dest`
    pub fn is_new_destination(&self, dest: &Destination) -> bool {
        !self.destination_totals.contains_key(dest)
    }

    /// Largest cumulative per-destination total, or zero
    pub fn max_previous_amount(&self) -> Amount {
        self.destination_totals
            .values()
            .copied()
            .max()
            .unwrap_or(Amount::ZERO)
    }

    /// Number of recorded submissions
    pub fn recent_count(&self) -> usize {
        self.history.len()
    }

    /// Subtract `amount` from the balance.
    ///
    /// Submissions are validated against the balance before they get here;
    /// an overdraft is still refused rather than going negative.
    pub fn debit(&mut self, amount: Amount) -> EngineResult<Amount> {
        let remaining = self
            .balance
            .checked_sub(&amount)
            .ok_or(EngineError::Overdraft {
                available: self.balance,
                requested: amount,
            })?;
        self.balance = remaining;
        Ok(remaining)
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn history(&self) -> &[Destination] {
        &self.history
    }

    /// Cumulative amount sent to `dest` (zero if never recorded)
    pub fn total_sent_to(&self, dest: &Destination) -> Amount {
        self.destination_totals
            .get(dest)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Number of distinct destinations recorded
    pub fn destination_count(&self) -> usize {
        self.destination_totals.len()
    }
}
