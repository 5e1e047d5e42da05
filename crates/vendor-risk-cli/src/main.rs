mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::assessment::{DisplayArgs, EnrichArgs, MigrateArgs};
use commands::grading::{AggregateArgs, DescribeArgs, GradeArgs};

/// Vendor risk grading
#[derive(Parser)]
#[command(
    name = "vrg",
    version,
    about = "Vendor risk grading",
    long_about = "Translate vendor risk scores (0-100, lower is safer) into letter grades, \
                  risk narratives and business recommendations, and enrich stored \
                  assessment payloads with them."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log debug diagnostics to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate one risk score into a letter grade
    Grade(GradeArgs),
    /// Show the narrative and recommendation for a letter grade
    Describe(DescribeArgs),
    /// Combine component risk scores into an overall score
    Aggregate(AggregateArgs),
    /// Grade an assessment payload and enrich it with letter grades
    Enrich(EnrichArgs),
    /// Resolve the headline figure the UI shows for a stored assessment
    Display(DisplayArgs),
    /// Upgrade a stored assessment that predates letter grades
    Migrate(MigrateArgs),
    /// Print the score-to-grade table
    Tiers,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Grade(args) => commands::grading::run_grade(args),
        Commands::Describe(args) => commands::grading::run_describe(args),
        Commands::Aggregate(args) => commands::grading::run_aggregate(args),
        Commands::Enrich(args) => commands::assessment::run_enrich(args),
        Commands::Display(args) => commands::assessment::run_display(args),
        Commands::Migrate(args) => commands::assessment::run_migrate(args),
        Commands::Tiers => commands::grading::run_tiers(),
        Commands::Version => {
            println!("vrg {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
