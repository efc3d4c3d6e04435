pub mod calculation_report;
pub mod cost_model;
pub mod engine_config;
pub mod histogram;
pub mod inputs_file;
pub mod orchestrator;
pub mod percentiles;
pub mod projection;
pub mod random_source;
pub mod recommendations;
pub mod result_cache;
pub mod root_finder;
pub mod scenario_table;
pub mod simulation;
pub mod simulation_types;
