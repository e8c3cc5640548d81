//! Transfer decisions
//!
//! Ordered from least to most restrictive: `Approved < Challenge < Blocked`.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Outcome of scoring one transfer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Settle immediately
    Approved,
    /// Settle only after the sender echoes a one-time passcode
    Challenge,
    /// Do not settle
    Blocked,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved)
    }

    pub fn is_challenge(&self) -> bool {
        matches!(self, Decision::Challenge)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Decision::Blocked)
    }

    /// Status label shown to the sender
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Approved => "VERIFIED",
            Decision::Challenge => "REVIEW (OTP)",
            Decision::Blocked => "FROZEN",
        }
    }
}
