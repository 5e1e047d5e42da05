use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::grade::{LetterGrade, RiskLevel};
use super::narrative::BusinessRecommendation;
use crate::types::RiskScore;

// ---------------------------------------------------------------------------
// Tier table
// ---------------------------------------------------------------------------

pub const SCORE_MIN: Decimal = dec!(0);
pub const SCORE_MAX: Decimal = dec!(100);

/// One row of the grading table.
///
/// `min`/`max` are the inclusive integer bounds shown to users. For
/// fractional scores a tier covers `(previous.max, max]`; the first tier
/// covers `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeTier {
    pub min: Decimal,
    pub max: Decimal,
    pub grade: LetterGrade,
    pub risk_level: RiskLevel,
    pub business_recommendation: BusinessRecommendation,
}

impl GradeTier {
    const fn new(
        min: Decimal,
        max: Decimal,
        grade: LetterGrade,
        risk_level: RiskLevel,
        business_recommendation: BusinessRecommendation,
    ) -> Self {
        GradeTier {
            min,
            max,
            grade,
            risk_level,
            business_recommendation,
        }
    }

    /// Whether a score already clamped to [0, 100] falls in this tier.
    pub fn contains(&self, score: RiskScore) -> bool {
        if self.min == SCORE_MIN {
            score >= SCORE_MIN && score <= self.max
        } else {
            score > self.min - Decimal::ONE && score <= self.max
        }
    }
}

use BusinessRecommendation::{Approved, NotRecommended, ReviewRequired};

/// Lower risk score means a better grade. Tiers are contiguous and exhaustive
/// over [0, 100].
const GRADE_TIERS: [GradeTier; 12] = [
    GradeTier::new(dec!(0), dec!(5), LetterGrade::Ap, RiskLevel::Minimal, Approved),
    GradeTier::new(dec!(6), dec!(10), LetterGrade::A, RiskLevel::Minimal, Approved),
    GradeTier::new(dec!(11), dec!(15), LetterGrade::Am, RiskLevel::Minimal, Approved),
    GradeTier::new(dec!(16), dec!(25), LetterGrade::Bp, RiskLevel::Low, Approved),
    GradeTier::new(dec!(26), dec!(35), LetterGrade::B, RiskLevel::Low, Approved),
    GradeTier::new(dec!(36), dec!(45), LetterGrade::Bm, RiskLevel::Low, Approved),
    GradeTier::new(dec!(46), dec!(55), LetterGrade::Cp, RiskLevel::Medium, ReviewRequired),
    GradeTier::new(dec!(56), dec!(65), LetterGrade::C, RiskLevel::Medium, ReviewRequired),
    GradeTier::new(dec!(66), dec!(75), LetterGrade::Cm, RiskLevel::Medium, ReviewRequired),
    GradeTier::new(dec!(76), dec!(85), LetterGrade::Dp, RiskLevel::High, NotRecommended),
    GradeTier::new(dec!(86), dec!(95), LetterGrade::D, RiskLevel::High, NotRecommended),
    GradeTier::new(dec!(96), dec!(100), LetterGrade::F, RiskLevel::Critical, NotRecommended),
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The full grading table, best tier first.
pub fn grade_tiers() -> &'static [GradeTier] {
    &GRADE_TIERS
}

/// Map a risk score onto its letter grade.
///
/// Scores outside [0, 100] are clamped to the nearest bound rather than
/// rejected, so 105 grades as F and -3 grades as A+.
pub fn translate_score(score: RiskScore) -> LetterGrade {
    tier_for_score(score).grade
}

/// Risk level read straight from the tier table, for callers that only have
/// a raw score (e.g. legacy payloads without letter grades).
pub fn risk_level_for_score(score: RiskScore) -> RiskLevel {
    tier_for_score(score).risk_level
}

pub fn tier_for_score(score: RiskScore) -> &'static GradeTier {
    let clamped = clamp_score(score);
    let tier = GRADE_TIERS
        .iter()
        .find(|t| t.contains(clamped))
        .unwrap_or(&GRADE_TIERS[GRADE_TIERS.len() - 1]);
    tracing::debug!(%score, grade = %tier.grade, "selected grade tier");
    tier
}

pub fn clamp_score(score: RiskScore) -> RiskScore {
    if score < SCORE_MIN {
        SCORE_MIN
    } else if score > SCORE_MAX {
        SCORE_MAX
    } else {
        score
    }
}

pub fn is_in_range(score: RiskScore) -> bool {
    score >= SCORE_MIN && score <= SCORE_MAX
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::narrative::describe_grade;
    use rust_decimal_macros::dec;

    #[test]
    fn test_boundary_exactness() {
        assert_eq!(translate_score(dec!(0)), LetterGrade::Ap);
        assert_eq!(translate_score(dec!(5)), LetterGrade::Ap);
        assert_eq!(translate_score(dec!(6)), LetterGrade::A);
        assert_eq!(translate_score(dec!(15)), LetterGrade::Am);
        assert_eq!(translate_score(dec!(16)), LetterGrade::Bp);
        assert_eq!(translate_score(dec!(100)), LetterGrade::F);
    }

    #[test]
    fn test_every_tier_edge() {
        let expected = [
            (0, 5, LetterGrade::Ap),
            (6, 10, LetterGrade::A),
            (11, 15, LetterGrade::Am),
            (16, 25, LetterGrade::Bp),
            (26, 35, LetterGrade::B),
            (36, 45, LetterGrade::Bm),
            (46, 55, LetterGrade::Cp),
            (56, 65, LetterGrade::C),
            (66, 75, LetterGrade::Cm),
            (76, 85, LetterGrade::Dp),
            (86, 95, LetterGrade::D),
            (96, 100, LetterGrade::F),
        ];
        for (lo, hi, grade) in expected {
            assert_eq!(translate_score(Decimal::from(lo)), grade, "score {lo}");
            assert_eq!(translate_score(Decimal::from(hi)), grade, "score {hi}");
        }
    }

    #[test]
    fn test_fractional_scores_use_upper_closed_intervals() {
        assert_eq!(translate_score(dec!(5.0)), LetterGrade::Ap);
        assert_eq!(translate_score(dec!(5.01)), LetterGrade::A);
        assert_eq!(translate_score(dec!(5.5)), LetterGrade::A);
        assert_eq!(translate_score(dec!(10.0001)), LetterGrade::Am);
        assert_eq!(translate_score(dec!(95.5)), LetterGrade::F);
        assert_eq!(translate_score(dec!(0.0001)), LetterGrade::Ap);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(translate_score(dec!(105)), LetterGrade::F);
        assert_eq!(translate_score(dec!(100.0001)), LetterGrade::F);
        assert_eq!(translate_score(dec!(-3)), LetterGrade::Ap);
        assert_eq!(clamp_score(dec!(-0.5)), dec!(0));
        assert_eq!(clamp_score(dec!(250)), dec!(100));
        assert_eq!(clamp_score(dec!(42.5)), dec!(42.5));
        assert!(!is_in_range(dec!(100.0001)));
        assert!(is_in_range(dec!(100)));
    }

    #[test]
    fn test_lower_score_never_gets_worse_grade() {
        // Regression guard: grades must never be inverted (high score = good).
        let mut previous = translate_score(SCORE_MIN);
        let mut s = SCORE_MIN;
        while s <= SCORE_MAX {
            let current = translate_score(s);
            assert!(
                current.rank() >= previous.rank(),
                "grade improved from {previous} to {current} at score {s}"
            );
            previous = current;
            s += dec!(0.25);
        }
        assert!(translate_score(dec!(10)) < translate_score(dec!(90)));
    }

    #[test]
    fn test_every_integer_matches_exactly_one_tier() {
        for s in 0..=100 {
            let score = Decimal::from(s);
            let matches = grade_tiers().iter().filter(|t| t.contains(score)).count();
            assert_eq!(matches, 1, "score {s} matched {matches} tiers");
        }
    }

    #[test]
    fn test_tiers_contiguous_and_exhaustive() {
        let tiers = grade_tiers();
        assert_eq!(tiers.first().unwrap().min, SCORE_MIN);
        assert_eq!(tiers.last().unwrap().max, SCORE_MAX);
        for pair in tiers.windows(2) {
            assert_eq!(pair[1].min, pair[0].max + Decimal::ONE);
            assert!(pair[1].grade > pair[0].grade);
        }
    }

    #[test]
    fn test_table_agrees_with_narratives() {
        for tier in grade_tiers() {
            let n = describe_grade(tier.grade);
            assert_eq!(n.risk_level, tier.risk_level);
            assert_eq!(n.business_recommendation, tier.business_recommendation);
        }
    }

    #[test]
    fn test_risk_level_for_score() {
        assert_eq!(risk_level_for_score(dec!(3)), RiskLevel::Minimal);
        assert_eq!(risk_level_for_score(dec!(27)), RiskLevel::Low);
        assert_eq!(risk_level_for_score(dec!(55)), RiskLevel::Medium);
        assert_eq!(risk_level_for_score(dec!(83)), RiskLevel::High);
        assert_eq!(risk_level_for_score(dec!(99)), RiskLevel::Critical);
    }
}
