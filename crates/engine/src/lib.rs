//! WalletGuard Risk Engine
//!
//! Scores a proposed transfer by blending a model probability with
//! hand-authored heuristic rules, then maps the result to a decision.
//!
//! ```text
//!  amount ──► FraudModel ──► model_risk ─┐
//!                                         ├─► RiskPolicy::blend ─► final_risk ─► Decision
//!  amount, balance, dest,                 │
//!  hour, WalletMemory ──► RuleEvaluator ──┘ rule_risk + reasons
//! ```
//!
//! ## Key Components
//!
//! - [`memory::WalletMemory`] - Balance, send history and per-destination totals
//! - [`rules::RuleEvaluator`] - Additive heuristic rules with human-readable reasons
//! - [`policy::RiskPolicy`] - Blend with safety override, three-way thresholds
//! - [`decision::Decision`] - `Approved < Challenge < Blocked`
//! - [`engine::RiskEngine`] - Orchestrator, applies the model failure policy

pub mod assessment;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod memory;
pub mod policy;
pub mod request;
pub mod rules;

pub use assessment::RiskAssessment;
pub use config::{EngineConfig, ModelFailPolicy, PolicyConfig, RuleConfig};
pub use decision::Decision;
pub use engine::RiskEngine;
pub use error::{EngineError, EngineResult, ValidationError};
pub use memory::WalletMemory;
pub use policy::{Blend, RiskPolicy};
pub use request::TransactionRequest;
pub use rules::{RuleEvaluator, RuleHit, RuleId, RuleInput, RuleOutcome};
