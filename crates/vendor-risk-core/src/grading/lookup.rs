use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::grade::{LetterGrade, RiskLevel};
use super::narrative::{describe_grade, BusinessRecommendation};
use super::tiers::{clamp_score, is_in_range, tier_for_score};
use crate::types::{with_metadata, ComputationOutput, RiskScore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreGrade {
    pub score: RiskScore,
    /// Score actually graded, after clamping to [0, 100].
    pub graded_score: RiskScore,
    pub grade: LetterGrade,
    pub rank: u8,
    pub risk_level: RiskLevel,
    pub risk_description: String,
    pub business_recommendation: BusinessRecommendation,
    pub color: String,
    pub tier_min: RiskScore,
    pub tier_max: RiskScore,
}

/// Grade a single score and describe it.
pub fn grade_score(score: RiskScore) -> ComputationOutput<ScoreGrade> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let graded_score = clamp_score(score);
    if !is_in_range(score) {
        warnings.push(format!(
            "Score {} is outside 0-100; graded as {}.",
            score, graded_score
        ));
    }

    let tier = tier_for_score(score);
    let narrative = describe_grade(tier.grade);
    let result = ScoreGrade {
        score,
        graded_score,
        grade: tier.grade,
        rank: tier.grade.rank(),
        risk_level: narrative.risk_level,
        risk_description: narrative.risk_description,
        business_recommendation: narrative.business_recommendation,
        color: narrative.color,
        tier_min: tier.min,
        tier_max: tier.max,
    };

    let assumptions = serde_json::json!({
        "score_convention": "0-100 risk severity, lower is safer",
        "intervals": "closed on the upper bound; first tier closed on both ends",
        "out_of_range": "clamped to 0-100"
    });

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata("Letter grade lookup", &assumptions, warnings, elapsed, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lookup_in_range() {
        let out = grade_score(dec!(27));
        let g = &out.result;
        assert_eq!(g.grade, LetterGrade::B);
        assert_eq!(g.rank, 4);
        assert_eq!(g.tier_min, dec!(26));
        assert_eq!(g.tier_max, dec!(35));
        assert_eq!(g.business_recommendation, BusinessRecommendation::Approved);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_lookup_clamps_with_warning() {
        let out = grade_score(dec!(105));
        assert_eq!(out.result.grade, LetterGrade::F);
        assert_eq!(out.result.graded_score, dec!(100));
        assert_eq!(out.result.score, dec!(105));
        assert_eq!(out.warnings.len(), 1);
    }
}
