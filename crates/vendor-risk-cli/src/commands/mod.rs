pub mod assessment;
pub mod grading;
