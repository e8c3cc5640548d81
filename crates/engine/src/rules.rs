//! Heuristic rule evaluator
//!
//! Five independent, additive rules evaluated in a fixed order. Each hit adds
//! its weight to the rule risk and appends a reason. The sum is not capped.
//!
//! | # | Rule | Default weight |
//! |---|------|----------------|
//! | 1 | Late night (hour < 6 or >= 22) | 0.15 |
//! | 2 | Wallet drain > 80% | 0.30 |
//! | 2b | Wallet drain 40%–80% (exclusive with 2) | 0.20 |
//! | 3 | New destination | 0.20 |
//! | 4 | History length >= 5 | 0.15 |
//! | 5 | Amount > 30 and above every previous per-destination total | 0.15 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use walletguard_core::{Amount, Destination};

use crate::config::RuleConfig;
use crate::error::{EngineError, EngineResult};
use crate::memory::WalletMemory;

/// Identifier of a heuristic rule
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleId {
    LateNight,
    WalletDrainHigh,
    WalletDrainMedium,
    NewDestination,
    HighFrequency,
    FirstTimeHighAmount,
}

/// A triggered rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHit {
    pub id: RuleId,
    pub weight: Decimal,
    pub reason: String,
}

/// Inputs for one evaluation
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub amount: Amount,
    /// Balance before this transfer
    pub balance: Amount,
    pub destination: &'a Destination,
    /// Local wall-clock hour, 0..=23
    pub hour: u32,
}

/// Result of evaluating all rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Sum of triggered weights
    pub risk: Decimal,
    /// Triggered rules in evaluation order
    pub hits: Vec<RuleHit>,
}

impl RuleOutcome {
    fn push(&mut self, id: RuleId, weight: Decimal, reason: String) {
        tracing::debug!(rule = %id, %weight, "Rule triggered");
        self.risk += weight;
        self.hits.push(RuleHit { id, weight, reason });
    }

    pub fn reasons(&self) -> Vec<String> {
        self.hits.iter().map(|h| h.reason.clone()).collect()
    }

    pub fn ids(&self) -> Vec<RuleId> {
        self.hits.iter().map(|h| h.id).collect()
    }

    pub fn triggered(&self, id: RuleId) -> bool {
        self.hits.iter().any(|h| h.id == id)
    }
}

/// Evaluates the heuristic rules against wallet memory
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator {
    config: RuleConfig,
}

impl RuleEvaluator {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Run every rule in order. Reads `memory`, never mutates it.
    ///
    /// `input.balance` must be positive; validated requests guarantee this.
    pub fn evaluate(&self, input: &RuleInput<'_>, memory: &WalletMemory) -> EngineResult<RuleOutcome> {
        let cfg = &self.config;
        let mut outcome = RuleOutcome::default();

        // Rule 1: Late night
        if input.hour < cfg.late_night_end_hour || input.hour >= cfg.late_night_start_hour {
            outcome.push(
                RuleId::LateNight,
                cfg.late_night_weight,
                format!("Late night transaction (+{}%)", percent(cfg.late_night_weight)),
            );
        }

        // Rule 2: Wallet drain
        let drain_ratio = input
            .amount
            .ratio_of(&input.balance)
            .ok_or(EngineError::ZeroBalance)?;
        if drain_ratio > cfg.drain_high_ratio {
            outcome.push(
                RuleId::WalletDrainHigh,
                cfg.drain_high_weight,
                format!(
                    "Wallet drain > {}% (+{}%)",
                    percent(cfg.drain_high_ratio),
                    percent(cfg.drain_high_weight)
                ),
            );
        } else if drain_ratio >= cfg.drain_medium_ratio {
            outcome.push(
                RuleId::WalletDrainMedium,
                cfg.drain_medium_weight,
                format!(
                    "Wallet drain {}%–{}% (+{}%)",
                    percent(cfg.drain_medium_ratio),
                    percent(cfg.drain_high_ratio),
                    percent(cfg.drain_medium_weight)
                ),
            );
        }

        // Rule 3: New destination
        if memory.is_new_destination(input.destination) {
            outcome.push(
                RuleId::NewDestination,
                cfg.new_destination_weight,
                format!("New destination wallet (+{}%)", percent(cfg.new_destination_weight)),
            );
        }

        // Rule 4: Frequency spike
        if memory.recent_count() >= cfg.frequency_threshold {
            outcome.push(
                RuleId::HighFrequency,
                cfg.frequency_weight,
                format!("High transaction frequency (+{}%)", percent(cfg.frequency_weight)),
            );
        }

        // Rule 5: First-time high amount
        if input.amount.value() > cfg.high_amount_floor
            && input.amount > memory.max_previous_amount()
        {
            outcome.push(
                RuleId::FirstTimeHighAmount,
                cfg.high_amount_weight,
                format!("First-time high amount (+{}%)", percent(cfg.high_amount_weight)),
            );
        }

        Ok(outcome)
    }
}

/// 0.15 -> "15"
fn percent(fraction: Decimal) -> String {
    (fraction * Decimal::ONE_HUNDRED).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const DAYTIME: u32 = 14;

    fn amount(val: Decimal) -> Amount {
        Amount::new(val).unwrap()
    }

    fn dest(s: &str) -> Destination {
        Destination::new(s).unwrap()
    }

    fn evaluate(
        amt: Decimal,
        balance: Decimal,
        to: &str,
        hour: u32,
        memory: &WalletMemory,
    ) -> RuleOutcome {
        let destination = dest(to);
        let input = RuleInput {
            amount: amount(amt),
            balance: amount(balance),
            destination: &destination,
            hour,
        };
        RuleEvaluator::default().evaluate(&input, memory).unwrap()
    }

    fn known(destinations: &[(&str, Decimal)]) -> WalletMemory {
        let mut memory = WalletMemory::new(amount(dec!(1000)));
        for (d, a) in destinations {
            memory.record_destination(&dest(d), amount(*a));
        }
        memory
    }

    #[test]
    fn test_quiet_transaction_triggers_nothing() {
        let memory = known(&[("A", dec!(50))]);
        let outcome = evaluate(dec!(10), dec!(100), "A", DAYTIME, &memory);

        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.risk, Decimal::ZERO);
    }

    #[test]
    fn test_late_night_window() {
        let memory = known(&[("A", dec!(50))]);

        for hour in [0, 5, 22, 23] {
            let outcome = evaluate(dec!(1), dec!(100), "A", hour, &memory);
            assert!(outcome.triggered(RuleId::LateNight), "hour {}", hour);
        }
        for hour in [6, 12, 21] {
            let outcome = evaluate(dec!(1), dec!(100), "A", hour, &memory);
            assert!(!outcome.triggered(RuleId::LateNight), "hour {}", hour);
        }
    }

    #[test]
    fn test_drain_rules_are_exclusive() {
        let memory = known(&[("A", dec!(1000))]);
        let cases = [
            (dec!(39.99), None),
            (dec!(40), Some(RuleId::WalletDrainMedium)),
            (dec!(80), Some(RuleId::WalletDrainMedium)),
            (dec!(80.01), Some(RuleId::WalletDrainHigh)),
            (dec!(100), Some(RuleId::WalletDrainHigh)),
        ];

        for (amt, expected) in cases {
            let outcome = evaluate(amt, dec!(100), "A", DAYTIME, &memory);
            let high = outcome.triggered(RuleId::WalletDrainHigh);
            let medium = outcome.triggered(RuleId::WalletDrainMedium);
            assert!(!(high && medium), "both drain rules for {}", amt);
            match expected {
                Some(RuleId::WalletDrainHigh) => assert!(high, "{}", amt),
                Some(RuleId::WalletDrainMedium) => assert!(medium, "{}", amt),
                _ => assert!(!high && !medium, "{}", amt),
            }
        }
    }

    #[test]
    fn test_high_drain_weight() {
        let memory = known(&[("A", dec!(1000))]);
        let outcome = evaluate(dec!(90), dec!(100), "A", DAYTIME, &memory);

        assert_eq!(outcome.risk, dec!(0.30));
        assert_eq!(outcome.reasons(), vec!["Wallet drain > 80% (+30%)".to_string()]);
    }

    #[test]
    fn test_frequency_threshold() {
        let four = known(&[("A", dec!(1)), ("A", dec!(1)), ("A", dec!(1)), ("A", dec!(1))]);
        assert!(!evaluate(dec!(1), dec!(100), "A", DAYTIME, &four).triggered(RuleId::HighFrequency));

        let mut five = four.clone();
        five.record_destination(&dest("A"), amount(dec!(1)));
        assert!(evaluate(dec!(1), dec!(100), "A", DAYTIME, &five).triggered(RuleId::HighFrequency));
    }

    #[test]
    fn test_first_time_high_amount() {
        // Above 30 but not above the largest previous total
        let memory = known(&[("A", dec!(45))]);
        let outcome = evaluate(dec!(40), dec!(1000), "A", DAYTIME, &memory);
        assert!(!outcome.triggered(RuleId::FirstTimeHighAmount));

        // Exactly 30 is not "> 30"
        let empty = known(&[]);
        let outcome = evaluate(dec!(30), dec!(1000), "B", DAYTIME, &empty);
        assert!(!outcome.triggered(RuleId::FirstTimeHighAmount));

        let outcome = evaluate(dec!(46), dec!(1000), "A", DAYTIME, &memory);
        assert!(outcome.triggered(RuleId::FirstTimeHighAmount));
    }

    #[test]
    fn test_all_rules_in_order() {
        let memory = known(&[
            ("A", dec!(5)),
            ("A", dec!(5)),
            ("A", dec!(5)),
            ("A", dec!(5)),
            ("A", dec!(5)),
        ]);
        let outcome = evaluate(dec!(95), dec!(100), "Z", 23, &memory);

        assert_eq!(
            outcome.ids(),
            vec![
                RuleId::LateNight,
                RuleId::WalletDrainHigh,
                RuleId::NewDestination,
                RuleId::HighFrequency,
                RuleId::FirstTimeHighAmount,
            ]
        );
        assert_eq!(outcome.risk, dec!(0.95));
        assert_eq!(
            outcome.reasons(),
            vec![
                "Late night transaction (+15%)",
                "Wallet drain > 80% (+30%)",
                "New destination wallet (+20%)",
                "High transaction frequency (+15%)",
                "First-time high amount (+15%)",
            ]
        );
    }

    #[test]
    fn test_medium_drain_reason_text() {
        let memory = known(&[("A", dec!(1000))]);
        let outcome = evaluate(dec!(50), dec!(100), "A", DAYTIME, &memory);
        assert_eq!(outcome.reasons(), vec!["Wallet drain 40%–80% (+20%)"]);
    }

    #[test]
    fn test_reasons_follow_configured_weights() {
        let config = RuleConfig {
            new_destination_weight: dec!(0.25),
            ..RuleConfig::default()
        };
        let destination = dest("new");
        let input = RuleInput {
            amount: amount(dec!(1)),
            balance: amount(dec!(100)),
            destination: &destination,
            hour: DAYTIME,
        };
        let outcome = RuleEvaluator::new(config)
            .evaluate(&input, &WalletMemory::default())
            .unwrap();

        assert_eq!(outcome.risk, dec!(0.25));
        assert_eq!(outcome.reasons(), vec!["New destination wallet (+25%)"]);
    }

    #[test]
    fn test_zero_balance_is_an_error() {
        let destination = dest("A");
        let input = RuleInput {
            amount: amount(dec!(1)),
            balance: Amount::ZERO,
            destination: &destination,
            hour: DAYTIME,
        };
        let result = RuleEvaluator::default().evaluate(&input, &WalletMemory::default());
        assert!(matches!(result, Err(EngineError::ZeroBalance)));
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(dec!(0.15)), "15");
        assert_eq!(percent(dec!(0.30)), "30");
        assert_eq!(percent(dec!(0.8)), "80");
        assert_eq!(percent(dec!(0.125)), "12.5");
    }
}
