pub mod aggregate;
pub mod components;

pub use aggregate::{aggregate_scores, calculate_overall_score, AggregateInput, AggregateScore};
pub use components::{Component, ComponentScores, ScoreWeights};
