//! Session events (written to the decision journal)
//!
//! One line per event, tagged by `event_type`. Challenge codes are never
//! recorded.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use walletguard_core::{Amount, Destination};
use walletguard_engine::{Decision, RiskAssessment};

/// Events appended to the decision journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Session started with this balance and configuration
    SessionOpened {
        id: String,
        initial_balance: Amount,
        config_fingerprint: String,
        model: String,
        timestamp: NaiveDateTime,
    },

    /// A transfer was scored
    TransactionAssessed {
        id: String,
        tx_id: String,
        amount: Amount,
        destination: Destination,
        assessment: RiskAssessment,
        timestamp: NaiveDateTime,
    },

    /// Funds left the wallet
    TransactionSettled {
        id: String,
        tx_id: String,
        amount: Amount,
        balance_after: Amount,
        via_challenge: bool,
        timestamp: NaiveDateTime,
    },

    /// Transfer parked behind an OTP
    ChallengeIssued {
        id: String,
        tx_id: String,
        timestamp: NaiveDateTime,
    },

    /// OTP verification did not release the transfer
    ChallengeFailed {
        id: String,
        tx_id: String,
        reason: ChallengeFailure,
        timestamp: NaiveDateTime,
    },
}

/// Why a challenge ended in a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeFailure {
    WrongCode,
    Expired,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl SessionEvent {
    /// Get the event ID
    pub fn id(&self) -> &str {
        match self {
            SessionEvent::SessionOpened { id, .. } => id,
            SessionEvent::TransactionAssessed { id, .. } => id,
            SessionEvent::TransactionSettled { id, .. } => id,
            SessionEvent::ChallengeIssued { id, .. } => id,
            SessionEvent::ChallengeFailed { id, .. } => id,
        }
    }

    /// Get the transaction ID if applicable
    pub fn tx_id(&self) -> Option<&str> {
        match self {
            SessionEvent::SessionOpened { .. } => None,
            SessionEvent::TransactionAssessed { tx_id, .. } => Some(tx_id),
            SessionEvent::TransactionSettled { tx_id, .. } => Some(tx_id),
            SessionEvent::ChallengeIssued { tx_id, .. } => Some(tx_id),
            SessionEvent::ChallengeFailed { tx_id, .. } => Some(tx_id),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            SessionEvent::SessionOpened { timestamp, .. } => *timestamp,
            SessionEvent::TransactionAssessed { timestamp, .. } => *timestamp,
            SessionEvent::TransactionSettled { timestamp, .. } => *timestamp,
            SessionEvent::ChallengeIssued { timestamp, .. } => *timestamp,
            SessionEvent::ChallengeFailed { timestamp, .. } => *timestamp,
        }
    }

    /// Decision carried by a `TransactionAssessed` event
    pub fn decision(&self) -> Option<Decision> {
        match self {
            SessionEvent::TransactionAssessed { assessment, .. } => Some(assessment.decision),
            _ => None,
        }
    }

    pub fn session_opened(
        initial_balance: Amount,
        config_fingerprint: impl Into<String>,
        model: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        SessionEvent::SessionOpened {
            id: new_id(),
            initial_balance,
            config_fingerprint: config_fingerprint.into(),
            model: model.into(),
            timestamp,
        }
    }

    pub fn transaction_assessed(
        tx_id: impl Into<String>,
        amount: Amount,
        destination: Destination,
        assessment: RiskAssessment,
        timestamp: NaiveDateTime,
    ) -> Self {
        SessionEvent::TransactionAssessed {
            id: new_id(),
            tx_id: tx_id.into(),
            amount,
            destination,
            assessment,
            timestamp,
        }
    }

    pub fn transaction_settled(
        tx_id: impl Into<String>,
        amount: Amount,
        balance_after: Amount,
        via_challenge: bool,
        timestamp: NaiveDateTime,
    ) -> Self {
        SessionEvent::TransactionSettled {
            id: new_id(),
            tx_id: tx_id.into(),
            amount,
            balance_after,
            via_challenge,
            timestamp,
        }
    }

    pub fn challenge_issued(tx_id: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        SessionEvent::ChallengeIssued {
            id: new_id(),
            tx_id: tx_id.into(),
            timestamp,
        }
    }

    pub fn challenge_failed(
        tx_id: impl Into<String>,
        reason: ChallengeFailure,
        timestamp: NaiveDateTime,
    ) -> Self {
        SessionEvent::ChallengeFailed {
            id: new_id(),
            tx_id: tx_id.into(),
            reason,
            timestamp,
        }
    }
}
