//! WalletGuard Core - Domain types
//!
//! This crate contains the fundamental types used across WalletGuard:
//! - `Amount`: Non-negative decimal wrapper for wallet amounts
//! - `Destination`: Validated destination wallet address

pub mod amount;
pub mod destination;

pub use amount::{Amount, AmountError};
pub use destination::{Destination, DestinationError};
