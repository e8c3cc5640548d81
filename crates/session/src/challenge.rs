//! OTP challenges
//!
//! A `Challenge` decision parks the transfer behind a 4-digit code. The code
//! is produced by a [`CodeGenerator`] so tests can pin it.

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use walletguard_core::{Amount, Destination};

/// Smallest and largest code a generator may produce
pub const CODE_MIN: u16 = 1000;
pub const CODE_MAX: u16 = 9999;

/// A 4-digit one-time code
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ChallengeCode(u16);

impl ChallengeCode {
    /// Returns `None` outside 1000..=9999
    pub fn new(code: u16) -> Option<Self> {
        (CODE_MIN..=CODE_MAX).contains(&code).then_some(Self(code))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Compare against user input. Surrounding whitespace is ignored;
    /// anything else must match the decimal form exactly.
    pub fn matches(&self, input: &str) -> bool {
        input.trim() == self.0.to_string()
    }
}

impl TryFrom<u16> for ChallengeCode {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        ChallengeCode::new(code).ok_or_else(|| format!("challenge code {} is not 4 digits", code))
    }
}

impl From<ChallengeCode> for u16 {
    fn from(code: ChallengeCode) -> u16 {
        code.0
    }
}

impl fmt::Display for ChallengeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Keep codes out of logs
impl fmt::Debug for ChallengeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChallengeCode(****)")
    }
}

/// A transfer waiting on OTP verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChallenge {
    pub tx_id: String,
    pub code: ChallengeCode,
    pub amount: Amount,
    pub destination: Destination,
    pub issued_at: NaiveDateTime,
}

impl PendingChallenge {
    /// Whether the challenge has outlived `ttl` at `now`
    pub fn is_expired(&self, now: NaiveDateTime, ttl: Option<Duration>) -> bool {
        match ttl {
            Some(ttl) => now - self.issued_at > ttl,
            None => false,
        }
    }
}

/// Source of challenge codes
pub trait CodeGenerator: Send {
    fn generate(&mut self) -> ChallengeCode;
}

/// Uniform codes in 1000..=9999
pub struct RandomCodeGenerator {
    rng: StdRng,
}

impl RandomCodeGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&mut self) -> ChallengeCode {
        ChallengeCode(self.rng.gen_range(CODE_MIN..=CODE_MAX))
    }
}

/// Always returns the same code
#[derive(Debug, Clone, Copy)]
pub struct FixedCodeGenerator(ChallengeCode);

impl FixedCodeGenerator {
    pub fn new(code: u16) -> Option<Self> {
        ChallengeCode::new(code).map(Self)
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&mut self) -> ChallengeCode {
        self.0
    }
}
