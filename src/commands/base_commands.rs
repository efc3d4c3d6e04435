use chrono::Local;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::services::calculation_report::ReportFormat;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate savings, scenarios, Monte Carlo ROI and projections
    Calculate {
        /// Operating inputs file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        input: String,
        /// Output results file
        #[arg(short, long)]
        output: String,
        /// Cap the Monte Carlo run at the quick-mode iteration count
        #[arg(short, long)]
        quick: bool,
        /// Number of Monte Carlo iterations (overrides the config file)
        #[arg(short = 'n', long)]
        iterations: Option<usize>,
        /// Random seed for reproducible runs (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
        /// Optional engine config YAML
        #[arg(short, long)]
        config: Option<String>,
        /// Date the investment starts (YYYY-MM-DD), used for the break-even date
        #[arg(short, long, default_value_t = default_start_date())]
        start_date: String,
        /// Output document format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Yaml)]
        format: ReportFormat,
        /// Optional PNG file for the simulated ROI distribution
        #[arg(long)]
        histogram: Option<String>,
    },
    /// Print the scenario table and check its probability weights
    Scenarios {
        /// Optional engine config YAML
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn default_start_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
