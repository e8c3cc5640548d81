//! Session wiring from command-line options

use rust_decimal::Decimal;
use std::path::PathBuf;
use walletguard_core::Amount;
use walletguard_model::{ConstantModel, FraudModel, LogisticModel};
use walletguard_session::{DecisionJournal, WalletGuardConfig, WalletSession};

/// Where the session's collaborators come from
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
    /// Overrides `session.initial_balance` from the config
    pub balance: Option<Decimal>,
    pub config: Option<PathBuf>,
    pub model: Option<PathBuf>,
    /// Output of the stand-in model when no model file is given
    pub baseline_risk: f64,
    pub journal: Option<PathBuf>,
}

/// Application context holding the live wallet session
pub struct AppContext {
    pub session: WalletSession,
}

impl AppContext {
    pub fn new(options: &ContextOptions) -> anyhow::Result<Self> {
        let mut config = match &options.config {
            Some(path) => WalletGuardConfig::from_file(path)?,
            None => WalletGuardConfig::default(),
        };

        if let Some(balance) = options.balance {
            config.session.initial_balance = Amount::new(balance)?;
        }

        let model: Box<dyn FraudModel> = match &options.model {
            Some(path) => {
                let model = LogisticModel::from_file(path)?;
                tracing::info!(path = %path.display(), "Loaded fraud model");
                Box::new(model)
            }
            None => {
                tracing::warn!(
                    baseline_risk = options.baseline_risk,
                    "No model file given, using constant baseline risk"
                );
                Box::new(ConstantModel::new(options.baseline_risk)?)
            }
        };

        let journal = match &options.journal {
            Some(path) => DecisionJournal::open(path)?,
            None => DecisionJournal::in_memory(),
        };

        let session = WalletSession::builder(config, model)
            .journal(journal)
            .build()?;

        Ok(Self { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn options() -> ContextOptions {
        ContextOptions {
            baseline_risk: 0.05,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let ctx = AppContext::new(&options()).unwrap();
        assert_eq!(ctx.session.balance().value(), dec!(125.45));
        assert_eq!(ctx.session.model_name(), "constant");
        assert!(ctx.session.journal().is_in_memory());
    }

    #[test]
    fn test_balance_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("walletguard.json");
        std::fs::write(&config, r#"{ "session": { "initial_balance": "10" } }"#).unwrap();

        let mut opts = options();
        opts.config = Some(config.clone());
        assert_eq!(AppContext::new(&opts).unwrap().session.balance().value(), dec!(10));

        opts.balance = Some(dec!(42));
        assert_eq!(AppContext::new(&opts).unwrap().session.balance().value(), dec!(42));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let mut opts = options();
        opts.balance = Some(dec!(-1));
        assert!(AppContext::new(&opts).is_err());

        let mut opts = options();
        opts.baseline_risk = 1.5;
        assert!(AppContext::new(&opts).is_err());

        let mut opts = options();
        opts.model = Some(PathBuf::from("/nonexistent/model.json"));
        assert!(AppContext::new(&opts).is_err());
    }

    #[test]
    fn test_journal_file_created() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options();
        opts.journal = Some(dir.path().join("journal.jsonl"));

        let ctx = AppContext::new(&opts).unwrap();
        assert!(!ctx.session.journal().is_in_memory());
        assert_eq!(ctx.session.journal().read_all().unwrap().len(), 1);
    }
}
