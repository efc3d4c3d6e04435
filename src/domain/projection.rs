use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionYear {
    pub year: u32,
    pub annual_savings: f64,
    pub cumulative_savings: f64,
    pub net_benefit: f64,
    pub cumulative_net_benefit: f64,
    pub cumulative_roi_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub years: Vec<ProjectionYear>,
    pub inflation_rate: f64,
    pub total_savings: f64,
    pub final_cumulative_roi_pct: f64,
    /// Months until cumulative savings cover the investment, from the
    /// first-year savings model.
    #[serde(serialize_with = "crate::domain::months::serialize_months")]
    pub break_even_month: f64,
}
