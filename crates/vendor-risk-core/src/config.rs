use serde::{Deserialize, Serialize};

use crate::scoring::aggregate::validate_weights;
use crate::scoring::ScoreWeights;
use crate::VendorRiskResult;

/// Options for the grading pipeline. Passed explicitly into every call that
/// needs it; nothing is read from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Category weights for the overall score. `null` weights present
    /// components equally.
    #[serde(default = "default_weights")]
    pub weights: Option<ScoreWeights>,
    /// Grade every component found in the payload, not just the four
    /// headline categories.
    #[serde(default = "default_true")]
    pub include_additional_components: bool,
    #[serde(default = "default_true")]
    pub include_suggestions: bool,
    #[serde(default = "default_true")]
    pub include_summary: bool,
}

fn default_weights() -> Option<ScoreWeights> {
    Some(ScoreWeights::default())
}

fn default_true() -> bool {
    true
}

impl Default for GradingConfig {
    fn default() -> Self {
        GradingConfig {
            weights: default_weights(),
            include_additional_components: true,
            include_suggestions: true,
            include_summary: true,
        }
    }
}

impl GradingConfig {
    pub fn validate(&self) -> VendorRiskResult<()> {
        if let Some(ref w) = self.weights {
            validate_weights(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: GradingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GradingConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_null_weights_means_equal_weighting() {
        let config: GradingConfig = serde_json::from_str(r#"{"weights": null}"#).unwrap();
        assert!(config.weights.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_fail_validation() {
        let config: GradingConfig =
            serde_json::from_str(r#"{"weights": {"security": 0.9, "compliance": 0.9}}"#).unwrap();
        assert!(config.validate().is_err());

        let ok: GradingConfig = serde_json::from_str(
            r#"{"weights": {"security": 0.5, "compliance": 0.5}, "include_suggestions": false}"#,
        )
        .unwrap();
        assert!(ok.validate().is_ok());
        assert!(!ok.include_suggestions);
        assert_eq!(ok.weights.unwrap().security, Some(dec!(0.5)));
    }
}
