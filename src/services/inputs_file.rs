use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::inputs::RawInputs;

#[derive(Error, Debug)]
pub enum InputsFileError {
    #[error("failed to read inputs file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse inputs yaml: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("failed to parse inputs json: {0}")]
    ParseJson(#[from] serde_json::Error),
}

// Every field optional so a missing one is reported by name during validation.
#[derive(Debug, Deserialize)]
struct InputsRecord {
    annual_revenue: Option<f64>,
    monthly_orders: Option<f64>,
    avg_order_value: Option<f64>,
    labor_cost: Option<f64>,
    shipping_cost: Option<f64>,
    error_cost: Option<f64>,
    inventory_cost: Option<f64>,
    investment: Option<f64>,
    currency: Option<String>,
    industry: Option<String>,
}

impl From<InputsRecord> for RawInputs {
    fn from(record: InputsRecord) -> Self {
        RawInputs {
            annual_revenue: record.annual_revenue,
            monthly_orders: record.monthly_orders,
            avg_order_value: record.avg_order_value,
            labor_cost: record.labor_cost,
            shipping_cost: record.shipping_cost,
            error_cost: record.error_cost,
            inventory_cost: record.inventory_cost,
            investment: record.investment,
            currency: record.currency,
            industry: record.industry,
        }
    }
}

/// Reads unvalidated inputs from `.json` files as JSON and from anything else
/// as YAML. Validation happens at the orchestrator boundary.
pub fn load_inputs_from_file<P: AsRef<Path>>(path: P) -> Result<RawInputs, InputsFileError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        deserialize_inputs_from_json_str(&contents)
    } else {
        deserialize_inputs_from_yaml_str(&contents)
    }
}

pub fn deserialize_inputs_from_yaml_str(input: &str) -> Result<RawInputs, InputsFileError> {
    let record: InputsRecord = serde_yaml::from_str(input)?;
    Ok(record.into())
}

pub fn deserialize_inputs_from_json_str(input: &str) -> Result<RawInputs, InputsFileError> {
    let record: InputsRecord = serde_json::from_str(input)?;
    Ok(record.into())
}
