use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Pessimistic,
    Realistic,
    Optimistic,
}

impl ScenarioKind {
    pub fn name(self) -> &'static str {
        match self {
            ScenarioKind::Pessimistic => "pessimistic",
            ScenarioKind::Realistic => "realistic",
            ScenarioKind::Optimistic => "optimistic",
        }
    }
}

/// A named macro outcome with its sampling weight and multiplicative impacts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub probability: f64,
    /// Multiplier on the savings (revenue) side.
    pub revenue_impact: f64,
    /// Multiplier on the investment/cost side.
    pub cost_impact: f64,
    pub timeline_months: u32,
}
