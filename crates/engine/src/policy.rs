//! Risk blending and decision thresholds
//!
//! ```text
//! final = model_weight * model_risk + rule_weight * rule_risk
//! if rule_risk >= override_floor: final = max(final, rule_risk)
//!
//! final <  challenge_threshold           -> Approved
//! final in [challenge, block) thresholds -> Challenge
//! final >= block_threshold               -> Blocked
//! ```
//!
//! The override keeps strong rule evidence from being diluted by a
//! miscalibrated model: once rule risk reaches the floor it also floors the
//! final score.

use rust_decimal::Decimal;

use crate::config::PolicyConfig;
use crate::decision::Decision;

/// Blended score plus whether the safety override raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blend {
    pub final_risk: Decimal,
    pub override_applied: bool,
}

/// Stateless blending and decision policy
#[derive(Debug, Clone, Default)]
pub struct RiskPolicy {
    config: PolicyConfig,
}

impl RiskPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Weighted blend with the safety override
    pub fn blend(&self, model_risk: Decimal, rule_risk: Decimal) -> Blend {
        let weighted = self.config.model_weight * model_risk + self.config.rule_weight * rule_risk;

        if rule_risk >= self.config.override_floor && rule_risk > weighted {
            Blend {
                final_risk: rule_risk,
                override_applied: true,
            }
        } else {
            Blend {
                final_risk: weighted,
                override_applied: false,
            }
        }
    }

    /// Map a final risk to a decision. Lower bounds are inclusive.
    pub fn decide(&self, final_risk: Decimal) -> Decision {
        if final_risk < self.config.challenge_threshold {
            Decision::Approved
        } else if final_risk < self.config.block_threshold {
            Decision::Challenge
        } else {
            Decision::Blocked
        }
    }
}
