use thiserror::Error;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_scenario_table;
use crate::services::engine_config::{EngineConfig, EngineConfigError};
use crate::services::orchestrator::{CalculationError, SimulationOrchestrator};

#[derive(Error, Debug)]
pub enum ScenariosCommandError {
    #[error("{0}")]
    Config(#[from] EngineConfigError),
    #[error("{0}")]
    Engine(#[from] CalculationError),
}

pub fn scenarios_command(cmd: Commands) -> Result<(), ScenariosCommandError> {
    let Commands::Scenarios { config } = cmd else {
        return Ok(());
    };

    let engine_config = EngineConfig::load(config.as_deref())?;
    let orchestrator = SimulationOrchestrator::new(engine_config)?;

    let table = orchestrator.scenarios();
    println!(
        "{}",
        format_scenario_table(
            table.scenarios(),
            table.weight_sum(),
            table.weights_are_consistent()
        )
    );
    Ok(())
}
