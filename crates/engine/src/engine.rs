//! Risk Engine - Main orchestrator
//!
//! Coordinates the model estimate, rule evaluation and decision policy.
//! Does not mutate wallet memory; the session applies the outcome.

use rust_decimal::Decimal;
use walletguard_model::FraudModel;

use crate::assessment::RiskAssessment;
use crate::config::{EngineConfig, ModelFailPolicy};
use crate::error::{EngineError, EngineResult};
use crate::memory::WalletMemory;
use crate::policy::{Blend, RiskPolicy};
use crate::request::TransactionRequest;
use crate::rules::{RuleEvaluator, RuleInput};

/// Main Risk Engine
///
/// Orchestrates:
/// - Model estimate (with fail policy)
/// - Rule evaluation against wallet memory
/// - Blending and decision
pub struct RiskEngine {
    config: EngineConfig,
    rules: RuleEvaluator,
    policy: RiskPolicy,
}

impl RiskEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            rules: RuleEvaluator::new(config.rules.clone()),
            policy: RiskPolicy::new(config.policy.clone()),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleEvaluator {
        &self.rules
    }

    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Score a validated request against the memory as it stands before the
    /// request is recorded.
    ///
    /// With `ModelFailPolicy::FailClosed` a model failure is returned as
    /// `EngineError::Model` and no assessment is produced.
    pub fn assess(
        &self,
        model: &dyn FraudModel,
        memory: &WalletMemory,
        request: &TransactionRequest,
        hour: u32,
    ) -> EngineResult<RiskAssessment> {
        let model_risk = match model.estimate(request.amount) {
            Ok(p) => Some(p.to_decimal()),
            Err(e) => match self.config.policy.model_fail_policy {
                ModelFailPolicy::FailClosed => {
                    tracing::error!(model = model.name(), error = %e, "Fraud model failed, refusing to decide");
                    return Err(EngineError::Model(e));
                }
                ModelFailPolicy::RulesOnly => {
                    tracing::warn!(model = model.name(), error = %e, "Fraud model failed, scoring on rules only");
                    None
                }
            },
        };

        let input = RuleInput {
            amount: request.amount,
            balance: request.balance,
            destination: &request.destination,
            hour,
        };
        let outcome = self.rules.evaluate(&input, memory)?;

        let blend = match model_risk {
            Some(model_risk) => self.policy.blend(model_risk, outcome.risk),
            None => Blend {
                final_risk: outcome.risk,
                override_applied: false,
            },
        };
        let decision = self.policy.decide(blend.final_risk);

        tracing::debug!(
            model_risk = ?model_risk,
            rule_risk = %outcome.risk,
            final_risk = %blend.final_risk,
            override_applied = blend.override_applied,
            "Risk blended"
        );

        Ok(RiskAssessment {
            model_risk: model_risk.unwrap_or(Decimal::ZERO),
            rule_risk: outcome.risk,
            final_risk: blend.final_risk,
            decision,
            reasons: outcome.reasons(),
            triggered: outcome.ids(),
            model_weight: self.config.policy.model_weight,
            rule_weight: self.config.policy.rule_weight,
            override_applied: blend.override_applied,
            model_degraded: model_risk.is_none(),
        })
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            rules: RuleEvaluator::new(config.rules.clone()),
            policy: RiskPolicy::new(config.policy.clone()),
            config,
        }
    }
}
