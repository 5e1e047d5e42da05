use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use vendor_risk_core::assessment::{self, AssessmentRecord};
use vendor_risk_core::config::GradingConfig;
use vendor_risk_core::grading;
use vendor_risk_core::scoring::{self, AggregateInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// An absent or empty config string means the default grading config.
fn parse_config(config_json: Option<String>) -> NapiResult<GradingConfig> {
    match config_json {
        Some(json) if !json.trim().is_empty() => {
            let config: GradingConfig = serde_json::from_str(&json).map_err(to_napi_error)?;
            config.validate().map_err(to_napi_error)?;
            Ok(config)
        }
        _ => Ok(GradingConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

#[napi]
pub fn grade_score(score: String) -> NapiResult<String> {
    let score: Decimal = score.trim().parse().map_err(to_napi_error)?;
    let output = grading::grade_score(score);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn describe_grade(grade: String) -> NapiResult<String> {
    let narrative = grading::describe_symbol(&grade).map_err(to_napi_error)?;
    serde_json::to_string(&narrative).map_err(to_napi_error)
}

#[napi]
pub fn grade_tiers() -> NapiResult<String> {
    serde_json::to_string(grading::grade_tiers()).map_err(to_napi_error)
}

#[napi]
pub fn aggregate_scores(input_json: String) -> NapiResult<String> {
    let input: AggregateInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = scoring::calculate_overall_score(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

#[napi]
pub fn grade_assessment(payload_json: String, config_json: Option<String>) -> NapiResult<String> {
    let payload: serde_json::Value = serde_json::from_str(&payload_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = assessment::grade_assessment(&payload, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn migrate_assessment(payload_json: String, config_json: Option<String>) -> NapiResult<String> {
    let payload: serde_json::Value = serde_json::from_str(&payload_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let migrated = assessment::migrate_legacy(&payload, &config).map_err(to_napi_error)?;
    serde_json::to_string(&migrated).map_err(to_napi_error)
}

#[napi]
pub fn primary_display(payload_json: String) -> NapiResult<String> {
    let payload: serde_json::Value = serde_json::from_str(&payload_json).map_err(to_napi_error)?;
    let record = AssessmentRecord::from_payload(&payload).map_err(to_napi_error)?;
    serde_json::to_string(&record.primary_display()).map_err(to_napi_error)
}
