use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::scoring::{Component, ComponentScores};
use crate::types::RiskScore;

/// `scoring_breakdown` sections and the component each one scores.
const BREAKDOWN_SECTIONS: [(&str, Component); 6] = [
    ("breach_assessment", Component::Security),
    ("compliance_assessment", Component::Compliance),
    ("privacy_assessment", Component::DataProtection),
    ("trust_center_assessment", Component::Operational),
    ("ai_assessment", Component::AiGovernance),
    ("data_flow_assessment", Component::DataFlows),
];

/// Keys accepted under `scores`, canonical name first.
fn score_aliases(component: Component) -> &'static [&'static str] {
    match component {
        Component::Security => &["security", "technical_security"],
        Component::Compliance => &["compliance", "compliance_framework", "compliance_risk"],
        Component::DataProtection => &[
            "data_protection",
            "encryption",
            "access_controls",
            "data_protection_risk",
        ],
        Component::Operational => &["operational", "infrastructure", "operational_risk"],
        Component::AiGovernance => &["ai_governance", "ai_business_risk"],
        Component::DataFlows => &["data_flows"],
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedScores {
    /// Top-level `overall_score`, when the upstream pipeline already computed one.
    pub overall_score: Option<RiskScore>,
    pub components: ComponentScores,
    pub warnings: Vec<String>,
}

/// Pull risk scores out of a raw assessment payload.
///
/// `scoring_breakdown.<section>.score` wins over `scores.<key>`. Absent
/// scores stay absent; nothing is defaulted.
pub fn extract_scores(payload: &Map<String, Value>) -> ExtractedScores {
    let mut out = ExtractedScores::default();

    out.overall_score = read_score(payload.get("overall_score"), "overall_score", &mut out.warnings);

    let breakdown = payload.get("scoring_breakdown").and_then(Value::as_object);
    let scores = payload.get("scores").and_then(Value::as_object);

    for component in Component::ALL {
        let from_breakdown = breakdown.and_then(|b| {
            BREAKDOWN_SECTIONS
                .iter()
                .find(|(_, c)| *c == component)
                .and_then(|(section, _)| {
                    let field = format!("scoring_breakdown.{section}.score");
                    let value = b.get(*section).and_then(|s| s.get("score"));
                    read_score(value, &field, &mut out.warnings)
                })
        });

        let score = from_breakdown.or_else(|| {
            scores.and_then(|s| {
                score_aliases(component).iter().find_map(|key| {
                    let field = format!("scores.{key}");
                    read_score(s.get(*key), &field, &mut out.warnings)
                })
            })
        });

        out.components.set(component, score);
    }

    out
}

fn read_score(value: Option<&Value>, field: &str, warnings: &mut Vec<String>) -> Option<RiskScore> {
    let value = value?;
    if value.is_null() {
        return None;
    }
    let parsed = value_to_score(value);
    if parsed.is_none() {
        tracing::warn!(field, %value, "ignoring non-numeric score");
        warnings.push(format!("Ignored non-numeric value for '{}': {}", field, value));
    }
    parsed
}

/// Read a JSON number or numeric string as a decimal.
pub fn value_to_score(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_breakdown_sections_map_to_components() {
        let payload = object(json!({
            "scoring_breakdown": {
                "breach_assessment": {"score": 12},
                "compliance_assessment": {"score": 30.5},
                "privacy_assessment": {"score": "44"},
                "trust_center_assessment": {"score": 20},
                "ai_assessment": {"score": 65},
                "data_flow_assessment": {"score": 70}
            }
        }));
        let out = extract_scores(&payload);
        assert_eq!(out.overall_score, None);
        assert_eq!(out.components.security, Some(dec!(12)));
        assert_eq!(out.components.compliance, Some(dec!(30.5)));
        assert_eq!(out.components.data_protection, Some(dec!(44)));
        assert_eq!(out.components.operational, Some(dec!(20)));
        assert_eq!(out.components.ai_governance, Some(dec!(65)));
        assert_eq!(out.components.data_flows, Some(dec!(70)));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_breakdown_wins_over_flat_scores() {
        let payload = object(json!({
            "scores": {"security": 80, "compliance": 40},
            "scoring_breakdown": {"breach_assessment": {"score": 10}}
        }));
        let out = extract_scores(&payload);
        assert_eq!(out.components.security, Some(dec!(10)));
        assert_eq!(out.components.compliance, Some(dec!(40)));
    }

    #[test]
    fn test_legacy_aliases() {
        let payload = object(json!({
            "scores": {
                "technical_security": 33,
                "compliance_framework": 22,
                "encryption": 11,
                "infrastructure": 55
            }
        }));
        let out = extract_scores(&payload);
        assert_eq!(out.components.security, Some(dec!(33)));
        assert_eq!(out.components.compliance, Some(dec!(22)));
        assert_eq!(out.components.data_protection, Some(dec!(11)));
        assert_eq!(out.components.operational, Some(dec!(55)));
    }

    #[test]
    fn test_missing_scores_are_not_defaulted() {
        let out = extract_scores(&object(json!({"vendor_name": "Acme"})));
        assert!(out.components.is_empty());
        assert_eq!(out.overall_score, None);
    }

    #[test]
    fn test_overall_score_and_bad_values() {
        let payload = object(json!({
            "overall_score": 83,
            "scores": {"security": "high", "compliance": null}
        }));
        let out = extract_scores(&payload);
        assert_eq!(out.overall_score, Some(dec!(83)));
        assert_eq!(out.components.security, None);
        assert_eq!(out.components.compliance, None);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("scores.security"));
    }

    #[test]
    fn test_value_to_score() {
        assert_eq!(value_to_score(&json!(27)), Some(dec!(27)));
        assert_eq!(value_to_score(&json!(27.25)), Some(dec!(27.25)));
        assert_eq!(value_to_score(&json!(" 55 ")), Some(dec!(55)));
        assert_eq!(value_to_score(&json!(1e2)), Some(dec!(100)));
        assert_eq!(value_to_score(&json!(true)), None);
        assert_eq!(value_to_score(&json!([1])), None);
    }
}
