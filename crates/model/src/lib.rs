//! WalletGuard Model Adapter
//!
//! Wraps the pretrained fraud classifier behind [`FraudModel`]. The engine only
//! sees `estimate(amount) -> Probability`; model training lives elsewhere.
//!
//! - [`LogisticModel`]: scaler + logistic regression loaded from JSON
//! - [`ConstantModel`]: fixed output, for tests and demos

mod error;
mod logistic;
mod mock;
mod types;

pub use error::ModelError;
pub use logistic::{LogisticModel, ScalerParams};
pub use mock::ConstantModel;
pub use types::{FraudModel, Probability, FEATURE_COUNT};
