//! Top-level configuration
//!
//! ```json
//! {
//!   "rules":   { "frequency_threshold": 5 },
//!   "policy":  { "block_threshold": "0.7", "model_fail_policy": "fail_closed" },
//!   "session": { "initial_balance": "125.45", "challenge_ttl_secs": 300 }
//! }
//! ```
//!
//! Missing sections and fields fall back to defaults.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use walletguard_core::Amount;
use walletguard_engine::EngineConfig;

use crate::error::{SessionError, SessionResult};

/// Engine configuration plus session settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletGuardConfig {
    #[serde(flatten)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Session-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Opening balance of the wallet
    #[serde(default = "default_initial_balance")]
    pub initial_balance: Amount,

    /// Seconds a challenge stays valid. `None` means no expiry.
    #[serde(default)]
    pub challenge_ttl_secs: Option<u64>,
}

fn default_initial_balance() -> Amount {
    Amount::new_unchecked(Decimal::new(12545, 2))
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            challenge_ttl_secs: None,
        }
    }
}

impl SessionConfig {
    /// The TTL as a duration. `None` when unset or too large to represent,
    /// which `validate` rejects.
    pub fn challenge_ttl(&self) -> Option<Duration> {
        self.challenge_ttl_secs.and_then(ttl_duration)
    }

    pub fn validate(&self) -> SessionResult<()> {
        match self.challenge_ttl_secs {
            Some(secs) if ttl_duration(secs).is_none() => Err(SessionError::Config(format!(
                "challenge_ttl_secs {} is out of range",
                secs
            ))),
            _ => Ok(()),
        }
    }
}

fn ttl_duration(secs: u64) -> Option<Duration> {
    i64::try_from(secs).ok().and_then(Duration::try_seconds)
}

impl WalletGuardConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> SessionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WalletGuardConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SessionResult<()> {
        self.engine.validate()?;
        self.session.validate()
    }

    /// SHA256 of the canonical JSON form, recorded in the journal so a
    /// decision can be traced back to the thresholds that produced it
    pub fn fingerprint(&self) -> SessionResult<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| SessionError::Config(format!("cannot serialize config: {}", e)))?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use walletguard_engine::ModelFailPolicy;

    #[test]
    fn test_default_session_config() {
        let config = SessionConfig::default();
        assert_eq!(config.initial_balance.value(), dec!(125.45));
        assert_eq!(config.challenge_ttl_secs, None);
        assert_eq!(config.challenge_ttl(), None);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: WalletGuardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WalletGuardConfig::default());
    }

    #[test]
    fn test_sections_parse() {
        let json = r#"{
            "rules": { "frequency_threshold": 3 },
            "policy": { "model_fail_policy": "rules_only" },
            "session": { "initial_balance": "500", "challenge_ttl_secs": 120 }
        }"#;
        let config: WalletGuardConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.engine.rules.frequency_threshold, 3);
        assert_eq!(config.engine.policy.model_fail_policy, ModelFailPolicy::RulesOnly);
        assert_eq!(config.session.initial_balance.value(), dec!(500));
        assert_eq!(config.session.challenge_ttl(), Some(Duration::seconds(120)));
    }

    #[test]
    fn test_negative_balance_rejected() {
        let json = r#"{ "session": { "initial_balance": "-1" } }"#;
        assert!(serde_json::from_str::<WalletGuardConfig>(json).is_err());
    }

    #[test]
    fn test_out_of_range_ttl_rejected() {
        let mut config = WalletGuardConfig::default();
        config.session.challenge_ttl_secs = Some(u64::MAX);

        assert_eq!(config.session.challenge_ttl(), None);
        assert!(matches!(config.validate(), Err(SessionError::Config(_))));

        config.session.challenge_ttl_secs = Some(86_400);
        assert!(config.validate().is_ok());
        assert_eq!(config.session.challenge_ttl(), Some(Duration::days(1)));
    }

    #[test]
    fn test_from_file_rejects_huge_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walletguard.json");
        std::fs::write(
            &path,
            r#"{ "session": { "initial_balance": "100", "challenge_ttl_secs": 18446744073709551615 } }"#,
        )
        .unwrap();

        let result = WalletGuardConfig::from_file(&path);
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let a = WalletGuardConfig::default();
        let mut b = WalletGuardConfig::default();
        b.engine.policy.block_threshold = dec!(0.75);

        let fa = a.fingerprint().unwrap();
        assert_eq!(fa.len(), 64);
        assert_eq!(fa, a.fingerprint().unwrap());
        assert_ne!(fa, b.fingerprint().unwrap());
    }

    #[test]
    fn test_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walletguard.json");
        std::fs::write(&path, r#"{ "policy": { "challenge_threshold": "0.9" } }"#).unwrap();

        let result = WalletGuardConfig::from_file(&path);
        assert!(matches!(result, Err(SessionError::Engine(_))));
    }
}
