use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Instant;

use super::extract::{extract_scores, ExtractedScores};
use super::schema::{
    BUSINESS_RECOMMENDATION_KEY, GRADE_SUMMARY_KEY, GRADING_SCHEMA_VERSION,
    GRADING_SCHEMA_VERSION_KEY, IMPROVEMENT_SUGGESTIONS_KEY, LETTER_GRADES_KEY,
    RISK_DESCRIPTION_KEY, GRADE_RISK_LEVEL_KEY,
};
use super::suggestions::{grade_summary, improvement_suggestions};
use crate::config::GradingConfig;
use crate::error::VendorRiskError;
use crate::grading::tiers::is_in_range;
use crate::grading::{describe_grade, grade_tiers, translate_score, GradeNarrative, LetterGrade};
use crate::scoring::{aggregate_scores, Component};
use crate::types::{with_metadata, ComputationOutput, RiskScore};
use crate::VendorRiskResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The `letter_grades` object added to an assessment.
///
/// `compliance`, `security` and `data_protection` are always written; an
/// ungraded component is `null` so readers see a stable shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterGrades {
    pub overall: LetterGrade,
    #[serde(default)]
    pub compliance: Option<LetterGrade>,
    #[serde(default)]
    pub security: Option<LetterGrade>,
    #[serde(default)]
    pub data_protection: Option<LetterGrade>,
    /// Other graded components, keyed by component name.
    #[serde(flatten)]
    pub additional: BTreeMap<String, LetterGrade>,
}

/// Everything derived for one assessment, ready to merge into its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReport {
    pub overall_score: RiskScore,
    pub letter_grades: LetterGrades,
    pub narrative: GradeNarrative,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub payload: Map<String, Value>,
    /// Keys that already existed and were left untouched.
    pub collisions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Grade a raw assessment payload and return it enriched.
///
/// Uses the payload's `overall_score` when present, otherwise aggregates the
/// component scores with the configured weights.
pub fn grade_assessment(
    payload: &Value,
    config: &GradingConfig,
) -> VendorRiskResult<ComputationOutput<Map<String, Value>>> {
    let start = Instant::now();
    let object = payload.as_object().ok_or_else(|| VendorRiskError::InvalidInput {
        field: "payload".into(),
        reason: "Assessment payload must be a JSON object.".into(),
    })?;
    config.validate()?;

    let extracted = extract_scores(object);
    let mut warnings = extracted.warnings.clone();
    let report = build_grade_report(&extracted, config, &mut warnings)?;

    let enrichment = enrich_assessment(object, &report);
    for key in &enrichment.collisions {
        warnings.push(format!(
            "Payload already contains '{}'; existing value kept.",
            key
        ));
    }

    let tiers: Vec<String> = grade_tiers()
        .iter()
        .map(|t| format!("{}: {}-{}", t.grade, t.min, t.max))
        .collect();
    let assumptions = serde_json::json!({
        "score_convention": "0-100 risk severity, lower is safer",
        "overall_source": if extracted.overall_score.is_some() { "payload" } else { "aggregated" },
        "weights": config.weights,
        "grade_tiers": tiers,
        "out_of_range": "clamped to 0-100"
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Vendor risk letter grading",
        &assumptions,
        warnings,
        elapsed,
        enrichment.payload,
    ))
}

/// Translate and narrate the extracted scores.
pub fn build_grade_report(
    extracted: &ExtractedScores,
    config: &GradingConfig,
    warnings: &mut Vec<String>,
) -> VendorRiskResult<GradeReport> {
    let overall_score = match extracted.overall_score {
        Some(score) => score,
        None => {
            let aggregate = aggregate_scores(&extracted.components, config.weights.as_ref())?;
            warnings.extend(aggregate.warnings);
            aggregate.overall_score
        }
    };

    if !is_in_range(overall_score) {
        tracing::warn!(%overall_score, "overall score out of range, clamped for grading");
        warnings.push(format!(
            "Overall score {} is outside 0-100; graded as the nearest bound.",
            overall_score
        ));
    }

    let overall = translate_score(overall_score);
    let component_grades: Vec<(Component, LetterGrade)> = extracted
        .components
        .present()
        .into_iter()
        .map(|(c, s)| (c, translate_score(s)))
        .collect();

    let grade_of = |component: Component| {
        component_grades
            .iter()
            .find(|(c, _)| *c == component)
            .map(|(_, g)| *g)
    };

    let mut additional = BTreeMap::new();
    if config.include_additional_components {
        for (component, grade) in &component_grades {
            if !matches!(
                component,
                Component::Security | Component::Compliance | Component::DataProtection
            ) {
                additional.insert(component.key().to_string(), *grade);
            }
        }
    }

    let letter_grades = LetterGrades {
        overall,
        compliance: grade_of(Component::Compliance),
        security: grade_of(Component::Security),
        data_protection: grade_of(Component::DataProtection),
        additional,
    };

    let narrative = describe_grade(overall);
    let improvement_suggestions = config
        .include_suggestions
        .then(|| improvement_suggestions(&component_grades));
    let summary = config
        .include_summary
        .then(|| grade_summary(overall_score, &narrative));

    Ok(GradeReport {
        overall_score,
        letter_grades,
        narrative,
        improvement_suggestions,
        summary,
    })
}

/// Merge a grade report into a copy of `payload` without touching any
/// existing key. A key that is already present is kept as-is and reported
/// as a collision; it usually means the payload was enriched before.
pub fn enrich_assessment(payload: &Map<String, Value>, report: &GradeReport) -> Enrichment {
    let mut enriched = payload.clone();
    let mut collisions = Vec::new();

    let mut additions: Vec<(&str, Value)> = vec![
        (
            LETTER_GRADES_KEY,
            serde_json::to_value(&report.letter_grades).unwrap_or(Value::Null),
        ),
        (
            RISK_DESCRIPTION_KEY,
            Value::String(report.narrative.risk_description.clone()),
        ),
        (
            BUSINESS_RECOMMENDATION_KEY,
            Value::String(report.narrative.business_recommendation.to_string()),
        ),
        (
            GRADE_RISK_LEVEL_KEY,
            Value::String(report.narrative.risk_level.to_string()),
        ),
        (GRADING_SCHEMA_VERSION_KEY, Value::from(GRADING_SCHEMA_VERSION)),
    ];
    if let Some(ref suggestions) = report.improvement_suggestions {
        additions.push((
            IMPROVEMENT_SUGGESTIONS_KEY,
            Value::from(suggestions.clone()),
        ));
    }
    if let Some(ref summary) = report.summary {
        additions.push((GRADE_SUMMARY_KEY, Value::String(summary.clone())));
    }

    for (key, value) in additions {
        if enriched.contains_key(key) {
            tracing::warn!(key, "assessment already contains key, keeping existing value");
            collisions.push(key.to_string());
        } else {
            enriched.insert(key.to_string(), value);
        }
    }

    Enrichment {
        payload: enriched,
        collisions,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
