//! Risk assessment - the immutable result of scoring one transfer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::rules::RuleId;

/// Everything the caller needs to display and act on a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Model fraud probability, [0, 1]
    pub model_risk: Decimal,
    /// Sum of triggered rule weights (uncapped)
    pub rule_risk: Decimal,
    /// Blended score the decision was made on
    pub final_risk: Decimal,
    pub decision: Decision,
    /// Rule explanations in evaluation order
    pub reasons: Vec<String>,
    /// Rule ids, parallel to `reasons`
    pub triggered: Vec<RuleId>,
    /// Blend weights in effect
    pub model_weight: Decimal,
    pub rule_weight: Decimal,
    /// Rule risk floored the final score
    pub override_applied: bool,
    /// The model was unavailable and the score is rules-only
    pub model_degraded: bool,
}

impl RiskAssessment {
    /// Human-readable score breakdown
    pub fn explain(&self) -> String {
        let mut out = String::new();

        if self.model_degraded {
            out.push_str("Model unavailable: rules-only scoring\n");
            out.push_str(&format!(
                "Final Risk = Rule Risk = {} %\n",
                as_percent(self.final_risk)
            ));
        } else {
            out.push_str(&format!(
                "Final Risk = ({} × ML Risk) + ({} × Rule Risk)\n",
                self.model_weight.normalize(),
                self.rule_weight.normalize()
            ));
            out.push_str(&format!(
                "           = ({} × {}) + ({} × {})\n",
                self.model_weight.normalize(),
                as_percent(self.model_risk),
                self.rule_weight.normalize(),
                as_percent(self.rule_risk)
            ));
            if self.override_applied {
                out.push_str(&format!(
                    "           -> safety override: rule risk {} % floors the score\n",
                    as_percent(self.rule_risk)
                ));
            }
            out.push_str(&format!("           = {} %\n", as_percent(self.final_risk)));
        }

        out
    }

    /// `final_risk` as a percentage string with two decimals
    pub fn final_percent(&self) -> String {
        as_percent(self.final_risk)
    }

    pub fn model_percent(&self) -> String {
        as_percent(self.model_risk)
    }

    pub fn rule_percent(&self) -> String {
        as_percent(self.rule_risk)
    }
}

/// 0.1234 -> "12.34"
fn as_percent(value: Decimal) -> String {
    format!("{:.2}", (value * Decimal::ONE_HUNDRED).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assessment(override_applied: bool, model_degraded: bool) -> RiskAssessment {
        RiskAssessment {
            model_risk: dec!(0.1),
            rule_risk: dec!(0.5),
            final_risk: dec!(0.5),
            decision: Decision::Challenge,
            reasons: vec![
                "Wallet drain > 80% (+30%)".to_string(),
                "New destination wallet (+20%)".to_string(),
            ],
            triggered: vec![RuleId::WalletDrainHigh, RuleId::NewDestination],
            model_weight: dec!(0.6),
            rule_weight: dec!(0.4),
            override_applied,
            model_degraded,
        }
    }

    #[test]
    fn test_percent_formatting() {
        let a = assessment(true, false);
        assert_eq!(a.final_percent(), "50.00");
        assert_eq!(a.model_percent(), "10.00");
        assert_eq!(as_percent(dec!(0.123456)), "12.35");
    }

    #[test]
    fn test_explain_shows_formula() {
        let text = assessment(false, false).explain();

        assert!(text.contains("Final Risk = (0.6 × ML Risk) + (0.4 × Rule Risk)"));
        assert!(text.contains("(0.6 × 10.00) + (0.4 × 50.00)"));
        assert!(text.trim_end().ends_with("= 50.00 %"));
        assert!(!text.contains("override"));
    }

    #[test]
    fn test_explain_mentions_override() {
        let text = assessment(true, false).explain();
        assert!(text.contains("safety override"));
    }

    #[test]
    fn test_explain_degraded() {
        let text = assessment(false, true).explain();
        assert!(text.contains("rules-only"));
        assert!(!text.contains("ML Risk"));
    }

    #[test]
    fn test_serialization() {
        let a = assessment(true, false);
        let json = serde_json::to_string(&a).unwrap();

        assert!(json.contains("\"decision\":\"challenge\""));
        assert!(json.contains("wallet_drain_high"));

        let parsed: RiskAssessment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, a);
    }
}
