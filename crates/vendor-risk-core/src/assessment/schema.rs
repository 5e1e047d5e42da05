use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enrich::grade_assessment;
use super::extract::value_to_score;
use crate::config::GradingConfig;
use crate::error::VendorRiskError;
use crate::grading::{risk_level_for_score, BusinessRecommendation, LetterGrade, RiskLevel};
use crate::types::RiskScore;
use crate::VendorRiskResult;

pub const LETTER_GRADES_KEY: &str = "letter_grades";
pub const RISK_DESCRIPTION_KEY: &str = "risk_description";
pub const BUSINESS_RECOMMENDATION_KEY: &str = "business_recommendation";
/// Kept apart from the `risk_level` that upstream assessment engines write
/// in their own vocabulary.
pub const GRADE_RISK_LEVEL_KEY: &str = "grade_risk_level";
pub const GRADING_SCHEMA_VERSION_KEY: &str = "grading_schema_version";
pub const IMPROVEMENT_SUGGESTIONS_KEY: &str = "improvement_suggestions";
pub const GRADE_SUMMARY_KEY: &str = "grade_summary";

/// Version written by the current enrichment.
pub const GRADING_SCHEMA_VERSION: u32 = 2;

/// Stored assessment layouts.
///
/// * `Legacy` (1): raw scores only, stored before letter grades existed.
/// * `Graded` (2): carries `letter_grades` and the narrative fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVersion {
    Legacy,
    Graded,
}

impl SchemaVersion {
    pub fn number(self) -> u32 {
        match self {
            Self::Legacy => 1,
            Self::Graded => 2,
        }
    }
}

/// Typed view over a stored assessment payload.
///
/// Known fields are parsed leniently; the untouched payload is kept so that
/// every key survives a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRecord {
    pub schema_version: SchemaVersion,
    pub vendor_name: Option<String>,
    pub vendor_domain: Option<String>,
    pub overall_score: Option<RiskScore>,
    pub overall_grade: Option<LetterGrade>,
    pub risk_description: Option<String>,
    pub business_recommendation: Option<BusinessRecommendation>,
    payload: Map<String, Value>,
}

/// What the UI should show as the headline figure for an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrimaryDisplay {
    Grade {
        grade: LetterGrade,
        risk_level: RiskLevel,
        color: String,
    },
    /// Fallback for payloads without a usable letter grade.
    RawScore {
        score: RiskScore,
        risk_level: RiskLevel,
        color: String,
    },
    Unavailable,
}

impl AssessmentRecord {
    pub fn from_payload(payload: &Value) -> VendorRiskResult<Self> {
        let object = payload.as_object().ok_or_else(|| VendorRiskError::InvalidInput {
            field: "payload".into(),
            reason: "Assessment payload must be a JSON object.".into(),
        })?;

        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        let overall_grade = object
            .get(LETTER_GRADES_KEY)
            .and_then(|g| g.get("overall"))
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<LetterGrade>().ok());

        let business_recommendation = object
            .get(BUSINESS_RECOMMENDATION_KEY)
            .and_then(|v| serde_json::from_value::<BusinessRecommendation>(v.clone()).ok());

        let declared_version = object.get(GRADING_SCHEMA_VERSION_KEY).and_then(Value::as_u64);
        let schema_version = match declared_version {
            Some(v) if v >= u64::from(GRADING_SCHEMA_VERSION) => SchemaVersion::Graded,
            Some(_) => SchemaVersion::Legacy,
            None if object.contains_key(LETTER_GRADES_KEY) => SchemaVersion::Graded,
            None => SchemaVersion::Legacy,
        };

        Ok(AssessmentRecord {
            schema_version,
            vendor_name: text("vendor_name"),
            vendor_domain: text("vendor_domain"),
            overall_score: object.get("overall_score").and_then(value_to_score),
            overall_grade,
            risk_description: text(RISK_DESCRIPTION_KEY),
            business_recommendation,
            payload: object.clone(),
        })
    }

    pub fn is_legacy(&self) -> bool {
        self.schema_version == SchemaVersion::Legacy
    }

    /// `letter_grades.overall` when available, otherwise the raw score
    /// coloured by its tier's risk level.
    pub fn primary_display(&self) -> PrimaryDisplay {
        if let Some(grade) = self.overall_grade {
            let risk_level = grade.risk_level();
            return PrimaryDisplay::Grade {
                grade,
                risk_level,
                color: risk_level.color().to_string(),
            };
        }
        match self.overall_score {
            Some(score) => {
                let risk_level = risk_level_for_score(score);
                PrimaryDisplay::RawScore {
                    score,
                    risk_level,
                    color: risk_level.color().to_string(),
                }
            }
            None => PrimaryDisplay::Unavailable,
        }
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn into_payload(self) -> Map<String, Value> {
        self.payload
    }
}

/// Bring a stored assessment up to the current layout.
///
/// Legacy payloads are graded and enriched; graded payloads come back
/// unchanged.
pub fn migrate_legacy(payload: &Value, config: &GradingConfig) -> VendorRiskResult<Map<String, Value>> {
    let record = AssessmentRecord::from_payload(payload)?;
    if !record.is_legacy() {
        return Ok(record.into_payload());
    }
    tracing::info!(
        vendor = record.vendor_name.as_deref().unwrap_or("unknown"),
        "migrating legacy assessment to graded schema"
    );
    Ok(grade_assessment(payload, config)?.result)
}
