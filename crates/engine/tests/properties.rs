//! Invariants of the scoring pipeline, checked over input sweeps

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use walletguard_core::{Amount, Destination};
use walletguard_engine::{
    Decision, RiskEngine, RiskPolicy, RuleEvaluator, RuleId, RuleInput, TransactionRequest,
    WalletMemory,
};
use walletguard_model::ConstantModel;

fn amount(val: Decimal) -> Amount {
    Amount::new(val).unwrap()
}

/// Memory with a mix of known destinations and enough history to vary rule 4
fn seeded_memory(entries: usize) -> WalletMemory {
    let mut memory = WalletMemory::new(amount(dec!(100)));
    for i in 0..entries {
        let dest = Destination::new(format!("known-{}", i % 3)).unwrap();
        memory.record_destination(&dest, amount(Decimal::from(i as i64 + 1)));
    }
    memory
}

#[test]
fn test_rule_risk_bounds_and_drain_exclusivity() {
    let evaluator = RuleEvaluator::default();
    let balance = amount(dec!(100));

    for history in [0, 2, 5, 8] {
        let memory = seeded_memory(history);
        for cents in (1..=10_000).step_by(137) {
            let amt = amount(Decimal::new(cents, 2));
            for to in ["known-0", "fresh"] {
                let destination = Destination::new(to).unwrap();
                for hour in [3, 14, 22] {
                    let input = RuleInput {
                        amount: amt,
                        balance,
                        destination: &destination,
                        hour,
                    };
                    let outcome = evaluator.evaluate(&input, &memory).unwrap();

                    assert!(outcome.risk >= Decimal::ZERO);
                    assert!(outcome.risk <= dec!(0.95));
                    assert_eq!(outcome.hits.len(), outcome.reasons().len());

                    let high = outcome.triggered(RuleId::WalletDrainHigh);
                    let medium = outcome.triggered(RuleId::WalletDrainMedium);
                    assert!(!(high && medium));
                    if amt.value() / balance.value() > dec!(0.8) {
                        assert!(high);
                    }
                }
            }
        }
    }
}

#[test]
fn test_override_invariant_across_model_outputs() {
    let policy = RiskPolicy::default();
    let mut rule = dec!(0.40);
    while rule <= dec!(0.95) {
        let mut model = Decimal::ZERO;
        while model <= Decimal::ONE {
            let blend = policy.blend(model, rule);
            assert!(blend.final_risk >= rule);
            assert_ne!(policy.decide(blend.final_risk), Decision::Approved);
            model += dec!(0.05);
        }
        rule += dec!(0.05);
    }
}

#[test]
fn test_scenario_small_send_to_new_destination() {
    let engine = RiskEngine::default();
    let memory = WalletMemory::new(amount(dec!(125.45)));
    let request = TransactionRequest::validate(dec!(10), "kaspa:qr9new", memory.balance()).unwrap();

    for p in [0.0, 0.3, 0.6, 0.99] {
        let model = ConstantModel::new(p).unwrap();
        let result = engine.assess(&model, &memory, &request, 13).unwrap();

        assert_eq!(result.rule_risk, dec!(0.20));
        assert_eq!(result.reasons, vec!["New destination wallet (+20%)"]);
        assert!(result.final_risk >= dec!(0.08));
    }
}

#[test]
fn test_scenario_wallet_drain_to_new_destination() {
    let engine = RiskEngine::default();
    let memory = WalletMemory::new(amount(dec!(100)));
    let request = TransactionRequest::validate(dec!(90), "kaspa:qr9new", memory.balance()).unwrap();

    for p in [0.0, 0.3, 0.6, 0.99] {
        let model = ConstantModel::new(p).unwrap();
        let result = engine.assess(&model, &memory, &request, 13).unwrap();

        assert!(result.triggered.contains(&RuleId::WalletDrainHigh));
        assert!(result.triggered.contains(&RuleId::NewDestination));
        assert!(result.rule_risk >= dec!(0.50));
        assert!(result.final_risk >= dec!(0.50));
        assert!(matches!(result.decision, Decision::Challenge | Decision::Blocked));
    }
}
