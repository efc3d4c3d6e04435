use crate::domain::scenario::{Scenario, ScenarioKind};

pub const WEIGHT_SUM_LOWER: f64 = 0.99;
pub const WEIGHT_SUM_UPPER: f64 = 1.01;

pub const STANDARD_SCENARIOS: [Scenario; 3] = [
    Scenario {
        kind: ScenarioKind::Pessimistic,
        probability: 0.25,
        revenue_impact: 0.70,
        cost_impact: 1.20,
        timeline_months: 18,
    },
    Scenario {
        kind: ScenarioKind::Realistic,
        probability: 0.50,
        revenue_impact: 1.00,
        cost_impact: 1.00,
        timeline_months: 12,
    },
    Scenario {
        kind: ScenarioKind::Optimistic,
        probability: 0.25,
        revenue_impact: 1.30,
        cost_impact: 0.90,
        timeline_months: 9,
    },
];

/// Scenario-adjusted savings and investment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioAdjustment {
    pub annual_savings: f64,
    pub investment: f64,
}

pub fn apply(scenario: &Scenario, base_savings: f64, base_investment: f64) -> ScenarioAdjustment {
    ScenarioAdjustment {
        annual_savings: base_savings * scenario.revenue_impact,
        investment: base_investment * scenario.cost_impact,
    }
}

/// Static scenario configuration. Weights are used as given, never
/// re-normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioTable {
    scenarios: Vec<Scenario>,
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self::new(STANDARD_SCENARIOS.to_vec())
    }
}

impl ScenarioTable {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn weight_sum(&self) -> f64 {
        self.scenarios.iter().map(|s| s.probability).sum()
    }

    pub fn weights_are_consistent(&self) -> bool {
        let sum = self.weight_sum();
        (WEIGHT_SUM_LOWER..=WEIGHT_SUM_UPPER).contains(&sum)
    }

    /// Logs a warning when the weights drift outside the accepted band.
    /// Returns whether the table is consistent.
    pub fn check_weights(&self) -> bool {
        let consistent = self.weights_are_consistent();
        if !consistent {
            tracing::warn!(
                weight_sum = self.weight_sum(),
                "scenario probabilities do not sum to 1.0"
            );
        }
        consistent
    }

    /// Running sum of the weights, in table order.
    pub fn cumulative_weights(&self) -> Vec<f64> {
        self.scenarios
            .iter()
            .scan(0.0, |acc, scenario| {
                *acc += scenario.probability;
                Some(*acc)
            })
            .collect()
    }
}
