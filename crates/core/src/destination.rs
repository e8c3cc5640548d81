//! Destination - Validated destination wallet address
//!
//! The engine only needs addresses to be comparable and non-empty; it does not
//! interpret their format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing destination addresses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DestinationError {
    #[error("Destination address is empty")]
    Empty,
}

/// A non-empty destination wallet address, surrounding whitespace trimmed.
///
/// ```
/// use walletguard_core::Destination;
///
/// let dest: Destination = "  kaspa:qz0abc ".parse().unwrap();
/// assert_eq!(dest.as_str(), "kaspa:qz0abc");
/// assert!("   ".parse::<Destination>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination(String);

impl Destination {
    pub fn new(address: impl AsRef<str>) -> Result<Self, DestinationError> {
        let trimmed = address.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DestinationError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Destination {
    type Err = DestinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Destination {
    type Error = DestinationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Destination> for String {
    fn from(d: Destination) -> Self {
        d.0
    }
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
