//! WalletGuard CLI - interactive wallet front end
//!
//! This crate provides the `walletguard` binary and its command handling.

pub mod commands;
pub mod context;

pub use commands::{execute, Command, ParseError};
pub use context::{AppContext, ContextOptions};
