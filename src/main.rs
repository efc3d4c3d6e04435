mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::calculate_cmd::calculate_command;
use crate::commands::completions_cmd::completions_command;
use crate::commands::scenarios_cmd::scenarios_command;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roi_forecast=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Calculate { .. } => {
            if let Err(e) = calculate_command(cmd) {
                eprintln!("Failed to calculate ROI forecast: {e:?}");
                std::process::exit(1);
            }
        }
        cmd @ Commands::Scenarios { .. } => {
            if let Err(e) = scenarios_command(cmd) {
                eprintln!("Failed to list scenarios: {e:?}");
                std::process::exit(1);
            }
        }
        cmd @ Commands::Completions { .. } => completions_command(cmd),
    }
}
