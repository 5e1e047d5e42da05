use clap::Args;
use serde_json::Value;

use vendor_risk_core::assessment::{self, AssessmentRecord};

use crate::input;

/// Arguments for grading and enriching an assessment payload
#[derive(Args)]
pub struct EnrichArgs {
    /// Path to JSON assessment payload
    #[arg(long)]
    pub input: Option<String>,

    /// Grading config (JSON or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for resolving what the UI should display for a stored assessment
#[derive(Args)]
pub struct DisplayArgs {
    /// Path to JSON assessment payload
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for upgrading a stored assessment to the graded schema
#[derive(Args)]
pub struct MigrateArgs {
    /// Path to JSON assessment payload
    #[arg(long)]
    pub input: Option<String>,

    /// Grading config (JSON or YAML)
    #[arg(long)]
    pub config: Option<String>,
}

fn read_payload(path: Option<&str>, what: &str) -> Result<Value, Box<dyn std::error::Error>> {
    input::read_json_input(path)?
        .ok_or_else(|| format!("--input <file.json> or stdin required for {}", what).into())
}

pub fn run_enrich(args: EnrichArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload = read_payload(args.input.as_deref(), "assessment enrichment")?;
    let config = input::config::read_config(args.config.as_deref())?;
    let result = assessment::grade_assessment(&payload, &config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_display(args: DisplayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload = read_payload(args.input.as_deref(), "display resolution")?;
    let record = AssessmentRecord::from_payload(&payload)?;
    Ok(serde_json::json!({
        "schema_version": record.schema_version.number(),
        "vendor_name": record.vendor_name,
        "display": record.primary_display(),
    }))
}

pub fn run_migrate(args: MigrateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payload = read_payload(args.input.as_deref(), "assessment migration")?;
    let config = input::config::read_config(args.config.as_deref())?;
    let migrated = assessment::migrate_legacy(&payload, &config)?;
    Ok(Value::Object(migrated))
}
