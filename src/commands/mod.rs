pub mod base_commands;
pub mod calculate_cmd;
pub mod completions_cmd;
pub mod report_format;
pub mod scenarios_cmd;
