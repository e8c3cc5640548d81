//! Engine configuration: rule weights, blend weights and decision thresholds
//!
//! Every field has a serde default, so a partial JSON file only overrides
//! what it names. Defaults reproduce the reference rule set exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// Rule and policy configuration for the [`RiskEngine`](crate::RiskEngine)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub rules: RuleConfig,

    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Heuristic rule thresholds and weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    // === Late night ===
    /// First hour (inclusive) of the late-night window
    #[serde(default = "default_late_night_start_hour")]
    pub late_night_start_hour: u32,

    /// Hour (exclusive) at which the late-night window ends
    #[serde(default = "default_late_night_end_hour")]
    pub late_night_end_hour: u32,

    #[serde(default = "default_late_night_weight")]
    pub late_night_weight: Decimal,

    // === Wallet drain ===
    /// Drain ratio strictly above this triggers the high drain rule
    #[serde(default = "default_drain_high_ratio")]
    pub drain_high_ratio: Decimal,

    #[serde(default = "default_drain_high_weight")]
    pub drain_high_weight: Decimal,

    /// Drain ratio at or above this (and not high) triggers the medium rule
    #[serde(default = "default_drain_medium_ratio")]
    pub drain_medium_ratio: Decimal,

    #[serde(default = "default_drain_medium_weight")]
    pub drain_medium_weight: Decimal,

    // === New destination ===
    #[serde(default = "default_new_destination_weight")]
    pub new_destination_weight: Decimal,

    // === Frequency ===
    /// History length at which the frequency rule fires
    #[serde(default = "default_frequency_threshold")]
    pub frequency_threshold: usize,

    #[serde(default = "default_frequency_weight")]
    pub frequency_weight: Decimal,

    // === First-time high amount ===
    /// Amount must exceed this floor (and every previous per-destination total)
    #[serde(default = "default_high_amount_floor")]
    pub high_amount_floor: Decimal,

    #[serde(default = "default_high_amount_weight")]
    pub high_amount_weight: Decimal,
}

/// Blend weights, safety override and decision thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_model_weight")]
    pub model_weight: Decimal,

    #[serde(default = "default_rule_weight")]
    pub rule_weight: Decimal,

    /// Rule risk at or above this floors the final risk
    #[serde(default = "default_override_floor")]
    pub override_floor: Decimal,

    /// Final risk at or above this requires an OTP challenge
    #[serde(default = "default_challenge_threshold")]
    pub challenge_threshold: Decimal,

    /// Final risk at or above this blocks the transfer
    #[serde(default = "default_block_threshold")]
    pub block_threshold: Decimal,

    #[serde(default)]
    pub model_fail_policy: ModelFailPolicy,
}

/// Policy when the fraud model cannot produce an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelFailPolicy {
    /// No decision without a model result; the submission fails and nothing
    /// is recorded
    #[default]
    FailClosed,

    /// Score on rules alone (`final_risk = rule_risk`) and mark the
    /// assessment as degraded
    RulesOnly,
}

// Default value functions for serde
fn default_late_night_start_hour() -> u32 {
    22
}

fn default_late_night_end_hour() -> u32 {
    6
}

fn default_late_night_weight() -> Decimal {
    Decimal::new(15, 2)
}

fn default_drain_high_ratio() -> Decimal {
    Decimal::new(8, 1)
}

fn default_drain_high_weight() -> Decimal {
    Decimal::new(30, 2)
}

fn default_drain_medium_ratio() -> Decimal {
    Decimal::new(4, 1)
}

fn default_drain_medium_weight() -> Decimal {
    Decimal::new(20, 2)
}

fn default_new_destination_weight() -> Decimal {
    Decimal::new(20, 2)
}

fn default_frequency_threshold() -> usize {
    5
}

fn default_frequency_weight() -> Decimal {
    Decimal::new(15, 2)
}

fn default_high_amount_floor() -> Decimal {
    Decimal::new(30, 0)
}

fn default_high_amount_weight() -> Decimal {
    Decimal::new(15, 2)
}

fn default_model_weight() -> Decimal {
    Decimal::new(6, 1)
}

fn default_rule_weight() -> Decimal {
    Decimal::new(4, 1)
}

fn default_override_floor() -> Decimal {
    Decimal::new(4, 1)
}

fn default_challenge_threshold() -> Decimal {
    Decimal::new(4, 1)
}

fn default_block_threshold() -> Decimal {
    Decimal::new(7, 1)
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            late_night_start_hour: default_late_night_start_hour(),
            late_night_end_hour: default_late_night_end_hour(),
            late_night_weight: default_late_night_weight(),
            drain_high_ratio: default_drain_high_ratio(),
            drain_high_weight: default_drain_high_weight(),
            drain_medium_ratio: default_drain_medium_ratio(),
            drain_medium_weight: default_drain_medium_weight(),
            new_destination_weight: default_new_destination_weight(),
            frequency_threshold: default_frequency_threshold(),
            frequency_weight: default_frequency_weight(),
            high_amount_floor: default_high_amount_floor(),
            high_amount_weight: default_high_amount_weight(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            model_weight: default_model_weight(),
            rule_weight: default_rule_weight(),
            override_floor: default_override_floor(),
            challenge_threshold: default_challenge_threshold(),
            block_threshold: default_block_threshold(),
            model_fail_policy: ModelFailPolicy::default(),
        }
    }
}

impl RuleConfig {
    fn validate(&self) -> EngineResult<()> {
        if self.late_night_start_hour > 23 || self.late_night_end_hour > 23 {
            return Err(EngineError::Config(format!(
                "late-night hours must be 0..=23, got start {} end {}",
                self.late_night_start_hour, self.late_night_end_hour
            )));
        }
        if self.drain_medium_ratio > self.drain_high_ratio {
            return Err(EngineError::Config(
                "drain_medium_ratio must not exceed drain_high_ratio".to_string(),
            ));
        }
        check_fractions(&[
            ("drain_high_ratio", self.drain_high_ratio),
            ("drain_medium_ratio", self.drain_medium_ratio),
            ("late_night_weight", self.late_night_weight),
            ("drain_high_weight", self.drain_high_weight),
            ("drain_medium_weight", self.drain_medium_weight),
            ("new_destination_weight", self.new_destination_weight),
            ("frequency_weight", self.frequency_weight),
            ("high_amount_weight", self.high_amount_weight),
        ])
    }
}

/// Weights and ratios must lie in [0, 1]
fn check_fractions(fields: &[(&str, Decimal)]) -> EngineResult<()> {
    match fields
        .iter()
        .find(|(_, v)| *v < Decimal::ZERO || *v > Decimal::ONE)
    {
        Some((name, value)) => Err(EngineError::Config(format!(
            "{} must be within 0..=1, got {}",
            name, value
        ))),
        None => Ok(()),
    }
}

impl PolicyConfig {
    fn validate(&self) -> EngineResult<()> {
        check_fractions(&[
            ("model_weight", self.model_weight),
            ("rule_weight", self.rule_weight),
        ])?;
        if self.challenge_threshold > self.block_threshold {
            return Err(EngineError::Config(format!(
                "challenge_threshold {} exceeds block_threshold {}",
                self.challenge_threshold, self.block_threshold
            )));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> EngineResult<()> {
        self.rules.validate()?;
        self.policy.validate()
    }
}
