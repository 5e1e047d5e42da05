use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VendorRiskError;

/// Ordered letter grade, best (`A+`) to worst (`F`).
///
/// Variant order is the grade order, so the derived `Ord` compares grades:
/// `LetterGrade::Ap < LetterGrade::F` means A+ is the better grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    Ap,
    A,
    #[serde(rename = "A-")]
    Am,
    #[serde(rename = "B+")]
    Bp,
    B,
    #[serde(rename = "B-")]
    Bm,
    #[serde(rename = "C+")]
    Cp,
    C,
    #[serde(rename = "C-")]
    Cm,
    #[serde(rename = "D+")]
    Dp,
    D,
    #[serde(rename = "D-")]
    Dm,
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 13] = [
        Self::Ap,
        Self::A,
        Self::Am,
        Self::Bp,
        Self::B,
        Self::Bm,
        Self::Cp,
        Self::C,
        Self::Cm,
        Self::Dp,
        Self::D,
        Self::Dm,
        Self::F,
    ];

    /// Position on the scale: 0 for A+, 12 for F.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Ap => "A+",
            Self::A => "A",
            Self::Am => "A-",
            Self::Bp => "B+",
            Self::B => "B",
            Self::Bm => "B-",
            Self::Cp => "C+",
            Self::C => "C",
            Self::Cm => "C-",
            Self::Dp => "D+",
            Self::D => "D",
            Self::Dm => "D-",
            Self::F => "F",
        }
    }

    pub fn risk_level(self) -> RiskLevel {
        match self {
            Self::Ap | Self::A | Self::Am => RiskLevel::Minimal,
            Self::Bp | Self::B | Self::Bm => RiskLevel::Low,
            Self::Cp | Self::C | Self::Cm => RiskLevel::Medium,
            Self::Dp | Self::D => RiskLevel::High,
            Self::Dm | Self::F => RiskLevel::Critical,
        }
    }

    /// True for C+ and anything worse.
    pub fn needs_improvement(self) -> bool {
        self >= Self::Cp
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LetterGrade {
    type Err = VendorRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.symbol() == trimmed)
            .ok_or_else(|| VendorRiskError::UnknownGrade {
                symbol: s.to_string(),
            })
    }
}

/// Coarse risk band shared by several adjacent grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Hex colour the UI uses for this band.
    pub fn color(self) -> &'static str {
        match self {
            Self::Minimal => "#059669",
            Self::Low => "#16a34a",
            Self::Medium => "#ca8a04",
            Self::High => "#ea580c",
            Self::Critical => "#dc2626",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order_best_to_worst() {
        for (i, grade) in LetterGrade::ALL.iter().enumerate() {
            assert_eq!(grade.rank() as usize, i);
        }
        assert_eq!(LetterGrade::Ap.rank(), 0);
        assert_eq!(LetterGrade::F.rank(), 12);
        assert!(LetterGrade::Ap < LetterGrade::A);
        assert!(LetterGrade::Dm < LetterGrade::F);
    }

    #[test]
    fn test_symbol_round_trip_through_from_str() {
        for grade in LetterGrade::ALL {
            assert_eq!(grade.symbol().parse::<LetterGrade>().unwrap(), grade);
            assert_eq!(grade.to_string(), grade.symbol());
        }
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        for bad in ["E", "A++", "", "N/A", "a+"] {
            let err = bad.parse::<LetterGrade>().unwrap_err();
            match err {
                VendorRiskError::UnknownGrade { symbol } => assert_eq!(symbol, bad),
                other => panic!("Expected UnknownGrade, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&LetterGrade::Bm).unwrap();
        assert_eq!(json, "\"B-\"");
        let parsed: LetterGrade = serde_json::from_str("\"D+\"").unwrap();
        assert_eq!(parsed, LetterGrade::Dp);
        assert!(serde_json::from_str::<LetterGrade>("\"Z\"").is_err());
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(LetterGrade::Am.risk_level(), RiskLevel::Minimal);
        assert_eq!(LetterGrade::Bp.risk_level(), RiskLevel::Low);
        assert_eq!(LetterGrade::Cm.risk_level(), RiskLevel::Medium);
        assert_eq!(LetterGrade::D.risk_level(), RiskLevel::High);
        assert_eq!(LetterGrade::Dm.risk_level(), RiskLevel::Critical);
        assert_eq!(LetterGrade::F.risk_level(), RiskLevel::Critical);
    }

    #[test]
    fn test_needs_improvement_threshold() {
        assert!(!LetterGrade::Bm.needs_improvement());
        assert!(LetterGrade::Cp.needs_improvement());
        assert!(LetterGrade::F.needs_improvement());
    }
}
