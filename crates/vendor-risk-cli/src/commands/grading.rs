use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use vendor_risk_core::grading::{self, describe_symbol, grade_tiers};
use vendor_risk_core::scoring::{self, AggregateInput, ComponentScores};

use crate::input;

/// Arguments for grading a single risk score
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GradeArgs {
    /// Risk score, 0-100 (lower is safer). Out-of-range values are clamped.
    #[arg(long)]
    pub score: Decimal,
}

/// Arguments for describing a letter grade
#[derive(Args)]
pub struct DescribeArgs {
    /// Letter grade symbol, e.g. "B+"
    #[arg(long, allow_hyphen_values = true)]
    pub grade: String,
}

/// Arguments for aggregating component scores
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AggregateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Security risk score
    #[arg(long)]
    pub security: Option<Decimal>,

    /// Compliance risk score
    #[arg(long)]
    pub compliance: Option<Decimal>,

    /// Data protection risk score
    #[arg(long)]
    pub data_protection: Option<Decimal>,

    /// Operational risk score
    #[arg(long)]
    pub operational: Option<Decimal>,

    /// AI governance risk score
    #[arg(long)]
    pub ai_governance: Option<Decimal>,

    /// Data flow risk score
    #[arg(long)]
    pub data_flows: Option<Decimal>,

    /// Grading config (JSON or YAML) supplying category weights
    #[arg(long)]
    pub config: Option<String>,

    /// Weight every present component equally
    #[arg(long, conflicts_with = "config")]
    pub equal_weights: bool,
}

pub fn run_grade(args: GradeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = grading::grade_score(args.score);
    Ok(serde_json::to_value(result)?)
}

pub fn run_describe(args: DescribeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let narrative = describe_symbol(&args.grade)?;
    Ok(serde_json::to_value(narrative)?)
}

pub fn run_tiers() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(grade_tiers())?)
}

pub fn run_aggregate(args: AggregateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let aggregate_input: AggregateInput = if let Some(data) =
        input::read_json_input(args.input.as_deref())?
    {
        data
    } else {
        let weights = if args.equal_weights {
            None
        } else {
            input::config::read_config(args.config.as_deref())?.weights
        };
        AggregateInput {
            scores: ComponentScores {
                security: args.security,
                compliance: args.compliance,
                data_protection: args.data_protection,
                operational: args.operational,
                ai_governance: args.ai_governance,
                data_flows: args.data_flows,
            },
            weights,
        }
    };

    let result = scoring::calculate_overall_score(&aggregate_input)?;
    Ok(serde_json::to_value(result)?)
}
