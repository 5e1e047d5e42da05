use crate::grading::tiers::clamp_score;
use crate::grading::{GradeNarrative, LetterGrade};
use crate::scoring::aggregate::round_score;
use crate::scoring::Component;
use crate::types::RiskScore;

const NO_ACTION: &str =
    "No material weaknesses identified; maintain current practices and keep pace with industry standards.";

fn suggestion_for(component: Component) -> &'static str {
    match component {
        Component::Security => "Implement stronger encryption and access controls",
        Component::Compliance => "Obtain relevant certifications such as SOC 2 or ISO 27001",
        Component::DataProtection => "Enhance privacy policies and data handling procedures",
        Component::Operational => "Improve incident response and business continuity plans",
        Component::AiGovernance => "Publish an AI usage policy and document model governance controls",
        Component::DataFlows => "Document sub-processors and cross-border data transfers",
    }
}

/// One suggestion per component graded C+ or worse.
pub fn improvement_suggestions(grades: &[(Component, LetterGrade)]) -> Vec<String> {
    let suggestions: Vec<String> = grades
        .iter()
        .filter(|(_, grade)| grade.needs_improvement())
        .map(|(component, grade)| {
            format!(
                "{} ({}): {}.",
                component.display_name(),
                grade,
                suggestion_for(*component)
            )
        })
        .collect();

    if suggestions.is_empty() {
        vec![NO_ACTION.to_string()]
    } else {
        suggestions
    }
}

/// The score shown is the one that was graded: clamped, then rounded.
pub fn grade_summary(score: RiskScore, narrative: &GradeNarrative) -> String {
    let symbol = narrative.grade.symbol();
    let article = if symbol.starts_with(['A', 'F']) { "an" } else { "a" };
    format!(
        "This vendor received {} {} grade ({}/100) indicating {} risk. {}",
        article,
        symbol,
        round_score(clamp_score(score)),
        narrative.risk_level,
        narrative.risk_description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::describe_grade;
    use rust_decimal_macros::dec;

    #[test]
    fn test_only_weak_components_get_suggestions() {
        let grades = [
            (Component::Security, LetterGrade::B),
            (Component::Compliance, LetterGrade::Cp),
            (Component::Operational, LetterGrade::F),
        ];
        let s = improvement_suggestions(&grades);
        assert_eq!(s.len(), 2);
        assert!(s[0].starts_with("Compliance (C+)"));
        assert!(s[1].starts_with("Operational (F)"));
    }

    #[test]
    fn test_strong_vendor_gets_single_line() {
        let grades = [(Component::Security, LetterGrade::Ap)];
        assert_eq!(improvement_suggestions(&grades), vec![NO_ACTION.to_string()]);
    }

    #[test]
    fn test_summary_text() {
        let n = describe_grade(LetterGrade::B);
        let s = grade_summary(dec!(27.4), &n);
        assert!(s.starts_with("This vendor received a B grade (27/100) indicating Low risk."));
        assert!(s.ends_with(&n.risk_description));
    }

    #[test]
    fn test_summary_uses_graded_score_and_article() {
        let f = grade_summary(dec!(105), &describe_grade(LetterGrade::F));
        assert!(f.starts_with("This vendor received an F grade (100/100)"), "{}", f);

        let a = grade_summary(dec!(-3), &describe_grade(LetterGrade::Ap));
        assert!(a.starts_with("This vendor received an A+ grade (0/100)"), "{}", a);
    }
}
