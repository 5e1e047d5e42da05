use thiserror::Error;

#[derive(Debug, Error)]
pub enum VendorRiskError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing score data: {0}")]
    MissingScoreData(String),

    #[error("Unknown letter grade '{symbol}'")]
    UnknownGrade { symbol: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for VendorRiskError {
    fn from(e: serde_json::Error) -> Self {
        VendorRiskError::SerializationError(e.to_string())
    }
}
