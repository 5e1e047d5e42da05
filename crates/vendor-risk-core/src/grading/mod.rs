pub mod grade;
pub mod lookup;
pub mod narrative;
pub mod tiers;

pub use grade::{LetterGrade, RiskLevel};
pub use lookup::{grade_score, ScoreGrade};
pub use narrative::{describe_grade, describe_symbol, BusinessRecommendation, GradeNarrative};
pub use tiers::{grade_tiers, risk_level_for_score, translate_score, GradeTier};
