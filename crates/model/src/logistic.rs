//! Logistic regression classifier with a pre-fit standard scaler
//!
//! Parameter file layout (JSON):
//!
//! ```json
//! {
//!   "scaler": { "mean": [30 numbers], "scale": [30 numbers] },
//!   "coefficients": [30 numbers],
//!   "intercept": -2.5
//! }
//! ```

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::path::Path;
use walletguard_core::Amount;

use crate::error::ModelError;
use crate::types::{FraudModel, Probability, FEATURE_COUNT};

/// Per-feature standardization: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl ScalerParams {
    /// Identity scaler (mean 0, scale 1)
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // A constant feature was fit with zero variance
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect()
    }
}

/// Binary logistic classifier over the 30-feature transaction vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    scaler: ScalerParams,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    /// Build a model, validating dimensions and finiteness
    pub fn new(
        scaler: ScalerParams,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, ModelError> {
        let model = Self {
            scaler,
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let model: LogisticModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<(), ModelError> {
        check_len("scaler.mean", &self.scaler.mean)?;
        check_len("scaler.scale", &self.scaler.scale)?;
        check_len("coefficients", &self.coefficients)?;

        let all_finite = self
            .scaler
            .mean
            .iter()
            .chain(&self.scaler.scale)
            .chain(&self.coefficients)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::InvalidParameter {
                field: "parameters",
                reason: "non-finite value".to_string(),
            });
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::InvalidParameter {
                field: "intercept",
                reason: "non-finite value".to_string(),
            });
        }
        Ok(())
    }

    /// Raw feature vector: zeros with the amount in the last slot
    fn features(amount: f64) -> [f64; FEATURE_COUNT] {
        let mut features = [0.0; FEATURE_COUNT];
        features[FEATURE_COUNT - 1] = amount;
        features
    }

    fn decision_function(&self, scaled: &[f64]) -> f64 {
        let dot: f64 = scaled
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum();
        dot + self.intercept
    }
}

impl FraudModel for LogisticModel {
    fn name(&self) -> &str {
        "logistic"
    }

    fn estimate(&self, amount: Amount) -> Result<Probability, ModelError> {
        let raw = amount
            .value()
            .to_f64()
            .ok_or_else(|| ModelError::InvalidInput(amount.to_string()))?;

        let scaled = self.scaler.transform(&Self::features(raw));
        let p = sigmoid(self.decision_function(&scaled));
        Probability::new(p.clamp(0.0, 1.0))
    }
}

fn check_len(field: &'static str, values: &[f64]) -> Result<(), ModelError> {
    if values.len() != FEATURE_COUNT {
        return Err(ModelError::DimensionMismatch {
            field,
            expected: FEATURE_COUNT,
            actual: values.len(),
        });
    }
    Ok(())
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn amount(val: i64) -> Amount {
        Amount::new(Decimal::new(val, 0)).unwrap()
    }

    /// Only the amount coefficient is set
    fn amount_only_model(weight: f64, mean: f64, scale: f64, intercept: f64) -> LogisticModel {
        let mut scaler = ScalerParams::identity();
        scaler.mean[FEATURE_COUNT - 1] = mean;
        scaler.scale[FEATURE_COUNT - 1] = scale;
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[FEATURE_COUNT - 1] = weight;
        LogisticModel::new(scaler, coefficients, intercept).unwrap()
    }

    #[test]
    fn test_zero_weights_give_half() {
        let model = LogisticModel::new(ScalerParams::identity(), vec![0.0; FEATURE_COUNT], 0.0).unwrap();
        let p = model.estimate(amount(500)).unwrap();
        assert!((p.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_amount_is_scaled_before_scoring() {
        // (100 - 100) / 50 = 0 -> sigmoid(0) = 0.5
        let model = amount_only_model(3.0, 100.0, 50.0, 0.0);
        let p = model.estimate(amount(100)).unwrap();
        assert!((p.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_other_features_do_not_contribute() {
        // Non-zero weights on unused slots only shift by -mean/scale,
        // which is zero under the identity scaler.
        let mut coefficients = vec![5.0; FEATURE_COUNT];
        coefficients[FEATURE_COUNT - 1] = 0.0;
        let model = LogisticModel::new(ScalerParams::identity(), coefficients, 0.0).unwrap();
        let p = model.estimate(amount(10)).unwrap();
        assert!((p.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_larger_amounts_score_higher_with_positive_weight() {
        let model = amount_only_model(0.02, 50.0, 1.0, -1.0);
        let low = model.estimate(amount(10)).unwrap();
        let high = model.estimate(amount(120)).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let model = amount_only_model(1.0, 0.0, 0.0, 0.0);
        let p = model.estimate(Amount::ZERO).unwrap();
        assert!((p.value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let model = amount_only_model(0.7, 20.0, 15.0, -0.3);
        let a = model.estimate(amount(42)).unwrap();
        let b = model.estimate(amount(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let result = LogisticModel::new(ScalerParams::identity(), vec![0.0; 3], 0.0);
        assert!(matches!(
            result,
            Err(ModelError::DimensionMismatch { field: "coefficients", expected: 30, actual: 3 })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = LogisticModel::new(ScalerParams::identity(), vec![0.0; FEATURE_COUNT], f64::NAN);
        assert!(matches!(result, Err(ModelError::InvalidParameter { field: "intercept", .. })));
    }

    #[test]
    fn test_from_json_str() {
        let model = amount_only_model(0.5, 10.0, 2.0, -1.5);
        let json = serde_json::to_string(&model).unwrap();
        let parsed = LogisticModel::from_json_str(&json).unwrap();
        assert_eq!(parsed, model);
    }

    #[test]
    fn test_from_json_short_scaler() {
        let json = r#"{
            "scaler": { "mean": [0.0], "scale": [1.0] },
            "coefficients": [],
            "intercept": 0.0
        }"#;
        let result = LogisticModel::from_json_str(json);
        assert!(matches!(
            result,
            Err(ModelError::DimensionMismatch { field: "scaler.mean", .. })
        ));
    }
}
