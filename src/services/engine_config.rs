use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::services::simulation::MonteCarloSettings;

#[derive(Error, Debug)]
pub enum EngineConfigError {
    #[error("failed to read engine config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse engine config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid engine config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables of the engine. Every key is optional in the YAML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub iterations: usize,
    pub quick_mode_iterations: usize,
    pub revenue_noise_std: f64,
    pub cost_noise_std: f64,
    pub payback_bound_months: f64,
    pub confidence_level: f64,
    pub discount_rate: f64,
    pub inflation_rate: f64,
    pub projection_years: u32,
    pub running_cost_rate: f64,
    pub cache_capacity: u64,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let monte_carlo = MonteCarloSettings::default();
        Self {
            iterations: 10_000,
            quick_mode_iterations: monte_carlo.quick_mode_iterations,
            revenue_noise_std: monte_carlo.revenue_noise_std,
            cost_noise_std: monte_carlo.cost_noise_std,
            payback_bound_months: monte_carlo.payback_bound_months,
            confidence_level: monte_carlo.confidence_level,
            discount_rate: 0.10,
            inflation_rate: 0.03,
            projection_years: 5,
            running_cost_rate: 0.15,
            cache_capacity: 256,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| EngineConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig =
            serde_yaml::from_str(&contents).map_err(|source| EngineConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load(path: Option<&str>) -> Result<Self, EngineConfigError> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.iterations == 0 {
            return Err(invalid("iterations", "must be greater than zero"));
        }
        if self.quick_mode_iterations == 0 {
            return Err(invalid("quick_mode_iterations", "must be greater than zero"));
        }
        for (field, value) in [
            ("revenue_noise_std", self.revenue_noise_std),
            ("cost_noise_std", self.cost_noise_std),
            ("running_cost_rate", self.running_cost_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be finite and >= 0, got {value}")));
            }
        }
        if !self.payback_bound_months.is_finite() || self.payback_bound_months <= 0.0 {
            return Err(invalid("payback_bound_months", "must be a positive number"));
        }
        if !(0.0..=1.0).contains(&self.confidence_level) {
            return Err(invalid("confidence_level", "must lie in [0, 1]"));
        }
        for (field, value) in [
            ("discount_rate", self.discount_rate),
            ("inflation_rate", self.inflation_rate),
        ] {
            if !value.is_finite() || value <= -1.0 {
                return Err(invalid(field, format!("must be finite and > -1, got {value}")));
            }
        }
        if self.projection_years == 0 {
            return Err(invalid("projection_years", "must be at least 1"));
        }
        if self.cache_capacity == 0 {
            return Err(invalid("cache_capacity", "must be greater than zero"));
        }
        Ok(())
    }

    pub fn iterations(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.iterations).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn monte_carlo_settings(&self) -> MonteCarloSettings {
        MonteCarloSettings {
            quick_mode_iterations: self.quick_mode_iterations,
            revenue_noise_std: self.revenue_noise_std,
            cost_noise_std: self.cost_noise_std,
            payback_bound_months: self.payback_bound_months,
            confidence_level: self.confidence_level,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> EngineConfigError {
    EngineConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
