use chrono::NaiveDate;
use thiserror::Error;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_calculation_report;
use crate::services::calculation_report::{build_report, write_report};
use crate::services::engine_config::{EngineConfig, EngineConfigError};
use crate::services::histogram::{HistogramError, write_histogram_png};
use crate::services::inputs_file::{InputsFileError, load_inputs_from_file};
use crate::services::orchestrator::{CalculationError, SimulationOrchestrator};

#[derive(Error, Debug)]
pub enum CalculateCommandError {
    #[error("{0}")]
    Config(#[from] EngineConfigError),
    #[error("{0}")]
    Inputs(#[from] InputsFileError),
    #[error("{0}")]
    Calculation(#[from] CalculationError),
    #[error("invalid start date: {0}")]
    InvalidStartDate(String),
    #[error("failed to write results: {0}")]
    Write(#[from] std::io::Error),
    #[error("{0}")]
    Histogram(#[from] HistogramError),
}

pub fn calculate_command(cmd: Commands) -> Result<(), CalculateCommandError> {
    let Commands::Calculate {
        input,
        output,
        quick,
        iterations,
        seed,
        config,
        start_date,
        format,
        histogram,
    } = cmd
    else {
        return Ok(());
    };

    let mut engine_config = EngineConfig::load(config.as_deref())?;
    if let Some(iterations) = iterations {
        engine_config.iterations = iterations;
    }
    if seed.is_some() {
        engine_config.seed = seed;
    }
    engine_config.validate()?;

    let start_date = NaiveDate::parse_from_str(&start_date, "%Y-%m-%d")
        .map_err(|_| CalculateCommandError::InvalidStartDate(start_date.clone()))?;
    let raw_inputs = load_inputs_from_file(&input)?;

    let orchestrator = SimulationOrchestrator::new(engine_config)?;
    let results = orchestrator.calculate_raw(raw_inputs, quick)?;
    let report = build_report(&input, start_date, &results);

    let mut buffer = Vec::new();
    write_report(&mut buffer, &report, format)?;
    std::fs::write(&output, buffer)?;

    if let Some(histogram_path) = histogram.as_deref() {
        write_histogram_png(histogram_path, &results.monte_carlo.histogram)?;
    }

    println!("{}", format_calculation_report(&report));
    println!("Results written to {output}");
    if let Some(histogram_path) = histogram {
        println!("ROI histogram written to {histogram_path}");
    }
    Ok(())
}
