use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::components::{Component, ComponentScores, ScoreWeights};
use crate::error::VendorRiskError;
use crate::grading::tiers::{clamp_score, is_in_range};
use crate::types::{with_metadata, ComputationOutput, RiskScore, Weight};
use crate::VendorRiskResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateInput {
    pub scores: ComponentScores,
    /// Omitted or null means every present component is weighted equally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoreWeights>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentWeight {
    pub component: Component,
    pub score: RiskScore,
    /// Weight after renormalising over the components that contributed.
    pub effective_weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateScore {
    /// Weighted score rounded half-to-even to an integer.
    pub overall_score: RiskScore,
    pub unrounded_score: RiskScore,
    pub contributions: Vec<ComponentWeight>,
    pub equal_weighting: bool,
    pub warnings: Vec<String>,
}

const WEIGHT_TOLERANCE: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Combine component risk scores into one overall risk score.
///
/// With `weights`, overall = Σ wᵢ·sᵢ / Σ wᵢ over the present components that
/// carry a weight. Without, present components are averaged. Scores are
/// clamped to [0, 100] first. Fails with `MissingScoreData` when nothing can
/// contribute; a missing assessment must never read as zero risk.
pub fn aggregate_scores(
    scores: &ComponentScores,
    weights: Option<&ScoreWeights>,
) -> VendorRiskResult<AggregateScore> {
    let present = scores.present();
    if present.is_empty() {
        return Err(VendorRiskError::MissingScoreData(
            "No component scores were supplied; refusing to score the assessment as zero risk."
                .into(),
        ));
    }

    if let Some(w) = weights {
        validate_weights(w)?;
    }

    let mut warnings = Vec::new();
    let mut weighted: Vec<(Component, RiskScore, Weight)> = Vec::with_capacity(present.len());

    for (component, raw) in present {
        let score = if is_in_range(raw) {
            raw
        } else {
            let clamped = clamp_score(raw);
            tracing::warn!(%component, %raw, %clamped, "component score out of range, clamped");
            warnings.push(format!(
                "{} score {} is outside 0-100; clamped to {}.",
                component.display_name(),
                raw,
                clamped
            ));
            clamped
        };

        let weight = match weights {
            None => Decimal::ONE,
            Some(w) => match w.get(component) {
                Some(weight) if weight > Decimal::ZERO => weight,
                Some(_) => {
                    warnings.push(format!(
                        "{} score present but its configured weight is 0; excluded from overall score.",
                        component.display_name()
                    ));
                    continue;
                }
                None => {
                    warnings.push(format!(
                        "{} score present but no weight is configured; excluded from overall score.",
                        component.display_name()
                    ));
                    continue;
                }
            },
        };
        weighted.push((component, score, weight));
    }

    let total_weight: Decimal = weighted.iter().map(|(_, _, w)| *w).sum();
    if weighted.is_empty() || total_weight.is_zero() {
        return Err(VendorRiskError::MissingScoreData(
            "None of the supplied component scores carries a configured weight.".into(),
        ));
    }

    let weighted_sum: Decimal = weighted.iter().map(|(_, s, w)| *s * *w).sum();
    let unrounded_score = weighted_sum / total_weight;
    let overall_score = round_score(unrounded_score);

    let contributions = weighted
        .into_iter()
        .map(|(component, score, weight)| ComponentWeight {
            component,
            score,
            effective_weight: weight / total_weight,
        })
        .collect();

    Ok(AggregateScore {
        overall_score,
        unrounded_score,
        contributions,
        equal_weighting: weights.is_none(),
        warnings,
    })
}

/// Aggregate with the standard computation envelope.
pub fn calculate_overall_score(
    input: &AggregateInput,
) -> VendorRiskResult<ComputationOutput<AggregateScore>> {
    let start = Instant::now();
    let result = aggregate_scores(&input.scores, input.weights.as_ref())?;
    let warnings = result.warnings.clone();

    let assumptions = serde_json::json!({
        "score_convention": "0-100 risk severity, lower is safer",
        "weighting": if input.weights.is_some() { "configured" } else { "equal" },
        "rounding": "nearest integer, half to even",
        "missing_components": "skipped, remaining weights renormalised"
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted component risk aggregation",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Round half to even, so 22.5 -> 22 and 23.5 -> 24.
pub fn round_score(score: Decimal) -> Decimal {
    score.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_weights(weights: &ScoreWeights) -> VendorRiskResult<()> {
    let configured = weights.configured();
    if configured.is_empty() {
        return Err(VendorRiskError::InvalidInput {
            field: "weights".into(),
            reason: "At least one category weight must be configured.".into(),
        });
    }
    if let Some((component, _)) = configured.iter().find(|(_, w)| *w < Decimal::ZERO) {
        return Err(VendorRiskError::InvalidInput {
            field: format!("weights.{}", component.key()),
            reason: "Weights must be non-negative.".into(),
        });
    }

    let sum: Decimal = configured.iter().map(|(_, w)| *w).sum();
    if (sum - Decimal::ONE).abs() > WEIGHT_TOLERANCE {
        return Err(VendorRiskError::InvalidInput {
            field: "weights".into(),
            reason: format!("Category weights must sum to 1.0 (got {}).", sum),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
