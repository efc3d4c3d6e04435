use serde::Serialize;

use crate::domain::costs::{CostBreakdown, CostCategory, SavingsBreakdown};
use crate::domain::projection::ProjectionSummary;
use crate::domain::scenario::ScenarioKind;
use crate::services::simulation_types::SimulationStatistics;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub first_year_roi_pct: f64,
    #[serde(serialize_with = "crate::domain::months::serialize_months")]
    pub payback_months: f64,
    /// Annual savings as a percentage of current annual costs.
    pub cost_reduction_pct: f64,
    pub savings_per_order: f64,
    pub savings_to_revenue_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: ScenarioKind,
    pub probability: f64,
    pub annual_savings: f64,
    pub investment: f64,
    pub roi_pct: f64,
    #[serde(serialize_with = "crate::domain::months::serialize_months")]
    pub payback_months: f64,
    pub timeline_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialMetrics {
    /// Period 0 is the negative investment, periods 1..N the projected savings.
    pub cash_flows: Vec<f64>,
    pub discount_rate: f64,
    pub npv: f64,
    /// `None` when the cash flows have no sign change.
    pub irr: Option<f64>,
    pub irr_approximate: bool,
    pub irr_iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: Option<CostCategory>,
    pub priority: Priority,
    pub annual_savings: f64,
    pub message: String,
}

/// Everything one `calculate` call produces. Read-only once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    pub cache_key: String,
    pub currency: String,
    pub industry: Option<String>,
    pub reduction_table_version: String,
    pub current_costs: CostBreakdown,
    pub optimized_costs: CostBreakdown,
    pub savings: SavingsBreakdown,
    pub key_metrics: KeyMetrics,
    pub scenarios: Vec<ScenarioOutcome>,
    pub monte_carlo: SimulationStatistics,
    pub projections: ProjectionSummary,
    pub financial: FinancialMetrics,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
impl Results {
    pub fn scenario(&self, kind: ScenarioKind) -> Option<&ScenarioOutcome> {
        self.scenarios.iter().find(|outcome| outcome.scenario == kind)
    }
}
