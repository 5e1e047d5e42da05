use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{RiskScore, Weight};

/// A risk category scored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Security,
    Compliance,
    DataProtection,
    Operational,
    AiGovernance,
    DataFlows,
}

impl Component {
    pub const ALL: [Component; 6] = [
        Self::Security,
        Self::Compliance,
        Self::DataProtection,
        Self::Operational,
        Self::AiGovernance,
        Self::DataFlows,
    ];

    /// Key used in payloads and in `letter_grades`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Compliance => "compliance",
            Self::DataProtection => "data_protection",
            Self::Operational => "operational",
            Self::AiGovernance => "ai_governance",
            Self::DataFlows => "data_flows",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Compliance => "Compliance",
            Self::DataProtection => "Data Protection",
            Self::Operational => "Operational",
            Self::AiGovernance => "AI Governance",
            Self::DataFlows => "Data Flows",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-category risk scores for one assessment. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<RiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<RiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_protection: Option<RiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational: Option<RiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_governance: Option<RiskScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_flows: Option<RiskScore>,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> Option<RiskScore> {
        match component {
            Component::Security => self.security,
            Component::Compliance => self.compliance,
            Component::DataProtection => self.data_protection,
            Component::Operational => self.operational,
            Component::AiGovernance => self.ai_governance,
            Component::DataFlows => self.data_flows,
        }
    }

    pub fn set(&mut self, component: Component, score: Option<RiskScore>) {
        let slot = match component {
            Component::Security => &mut self.security,
            Component::Compliance => &mut self.compliance,
            Component::DataProtection => &mut self.data_protection,
            Component::Operational => &mut self.operational,
            Component::AiGovernance => &mut self.ai_governance,
            Component::DataFlows => &mut self.data_flows,
        };
        *slot = score;
    }

    /// Present components in canonical order.
    pub fn present(&self) -> Vec<(Component, RiskScore)> {
        Component::ALL
            .iter()
            .filter_map(|&c| self.get(c).map(|s| (c, s)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        Component::ALL.iter().all(|&c| self.get(c).is_none())
    }
}

/// Category weights used when aggregating component scores.
///
/// A component without a weight does not contribute to the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_protection: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_governance: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_flows: Option<Weight>,
}

impl Default for ScoreWeights {
    /// Security 30%, compliance 25%, data protection 25%, operational 20%.
    fn default() -> Self {
        ScoreWeights {
            security: Some(dec!(0.30)),
            compliance: Some(dec!(0.25)),
            data_protection: Some(dec!(0.25)),
            operational: Some(dec!(0.20)),
            ai_governance: None,
            data_flows: None,
        }
    }
}

impl ScoreWeights {
    pub fn get(&self, component: Component) -> Option<Weight> {
        match component {
            Component::Security => self.security,
            Component::Compliance => self.compliance,
            Component::DataProtection => self.data_protection,
            Component::Operational => self.operational,
            Component::AiGovernance => self.ai_governance,
            Component::DataFlows => self.data_flows,
        }
    }

    pub fn configured(&self) -> Vec<(Component, Weight)> {
        Component::ALL
            .iter()
            .filter_map(|&c| self.get(c).map(|w| (c, w)))
            .collect()
    }
}
