pub mod error;
pub mod types;

#[cfg(feature = "grading")]
pub mod config;

#[cfg(feature = "grading")]
pub mod grading;

#[cfg(feature = "grading")]
pub mod scoring;

#[cfg(feature = "assessment")]
pub mod assessment;

pub use error::VendorRiskError;
pub use types::*;

/// Standard result type for all vendor-risk operations
pub type VendorRiskResult<T> = Result<T, VendorRiskError>;
