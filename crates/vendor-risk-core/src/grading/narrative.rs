use serde::{Deserialize, Serialize};
use std::fmt;

use super::grade::{LetterGrade, RiskLevel};
use crate::VendorRiskResult;

/// Procurement outcome derived solely from the letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessRecommendation {
    Approved,
    #[serde(rename = "Review Required")]
    ReviewRequired,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl BusinessRecommendation {
    pub fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::ReviewRequired => "Review Required",
            Self::NotRecommended => "Not Recommended",
        }
    }
}

impl fmt::Display for BusinessRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed text attached to a grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeNarrative {
    pub grade: LetterGrade,
    pub risk_level: RiskLevel,
    pub risk_description: String,
    pub business_recommendation: BusinessRecommendation,
    pub color: String,
}

/// Narrative for a grade. Pure lookup.
pub fn describe_grade(grade: LetterGrade) -> GradeNarrative {
    let risk_level = grade.risk_level();
    GradeNarrative {
        grade,
        risk_level,
        risk_description: risk_description(grade).to_string(),
        business_recommendation: recommendation(grade),
        color: risk_level.color().to_string(),
    }
}

/// Narrative for a grade symbol such as `"B+"`.
///
/// Fails with `UnknownGrade` for anything outside the 13 defined symbols.
pub fn describe_symbol(symbol: &str) -> VendorRiskResult<GradeNarrative> {
    let grade: LetterGrade = symbol.parse()?;
    Ok(describe_grade(grade))
}

pub fn recommendation(grade: LetterGrade) -> BusinessRecommendation {
    match grade {
        LetterGrade::Ap
        | LetterGrade::A
        | LetterGrade::Am
        | LetterGrade::Bp
        | LetterGrade::B
        | LetterGrade::Bm => BusinessRecommendation::Approved,
        LetterGrade::Cp | LetterGrade::C | LetterGrade::Cm => {
            BusinessRecommendation::ReviewRequired
        }
        LetterGrade::Dp | LetterGrade::D | LetterGrade::Dm | LetterGrade::F => {
            BusinessRecommendation::NotRecommended
        }
    }
}

fn risk_description(grade: LetterGrade) -> &'static str {
    match grade {
        LetterGrade::Ap => {
            "Outstanding security and compliance posture with industry-leading practices."
        }
        LetterGrade::A => "Excellent security and compliance with very minimal residual risk.",
        LetterGrade::Am => "Very good security practices with only minor areas for improvement.",
        LetterGrade::Bp => "Good security posture with some room for enhancement.",
        LetterGrade::B => "Above-average security following standard industry practices.",
        LetterGrade::Bm => "Satisfactory security, though several areas need attention.",
        LetterGrade::Cp => "Fair security posture that requires moderate improvements.",
        LetterGrade::C => "Average security with significant areas needing attention.",
        LetterGrade::Cm => "Below-average security that requires substantial improvements.",
        LetterGrade::Dp => "Poor security posture with major weaknesses identified.",
        LetterGrade::D => "Very poor security that requires immediate attention.",
        LetterGrade::Dm => "Failing security posture that requires urgent remediation.",
        LetterGrade::F => "Critical security failures that make the vendor unacceptable without remediation.",
    }
}
