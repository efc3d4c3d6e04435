use serde::Serialize;

use crate::domain::scenario::ScenarioKind;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RoiStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub p5: f64,
    pub p95: f64,
    pub worst_case: f64,
    pub best_case: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ConfidenceInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaybackStatistics {
    /// `+inf` when no trial pays back within the bound.
    #[serde(serialize_with = "crate::domain::months::serialize_months")]
    pub mean_months: f64,
    #[serde(serialize_with = "crate::domain::months::serialize_months")]
    pub median_months: f64,
    pub bound_months: f64,
    pub within_bound_share: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioShare {
    pub scenario: ScenarioKind,
    pub occurrences: usize,
    pub percentage: f64,
}

/// ROI distribution binned for charting. `bin_edges.len() == counts.len() + 1`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RoiHistogram {
    pub bin_edges: Vec<f64>,
    pub counts: Vec<usize>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationStatistics {
    pub requested_iterations: usize,
    pub iterations: usize,
    pub quick_mode: bool,
    /// Mean of simulated revenue minus simulated cost.
    pub mean_annual_benefit: f64,
    pub roi_pct: RoiStatistics,
    pub confidence_interval: ConfidenceInterval,
    pub probability_positive_roi: f64,
    pub payback: PaybackStatistics,
    pub scenario_distribution: Vec<ScenarioShare>,
    pub histogram: RoiHistogram,
}
