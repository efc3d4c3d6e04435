use std::sync::atomic::{AtomicUsize, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::inputs::{OperatingInputs, RawInputs};
use crate::domain::results::Results;
use crate::services::engine_config::EngineConfig;
use crate::services::orchestrator::SimulationOrchestrator;
use crate::services::random_source::RandomSource;
use crate::services::simulation::MonteCarloBase;

// A seeded random source that counts how many streams were handed out
pub struct CountingSource {
    seed: u64,
    pub streams: AtomicUsize,
}

impl CountingSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            streams: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for CountingSource {
    type Stream = StdRng;

    fn stream(&self) -> StdRng {
        self.streams.fetch_add(1, Ordering::SeqCst);
        StdRng::seed_from_u64(self.seed)
    }
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// The fulfilment-centre engagement used across the test suite.
pub fn sample_raw_inputs() -> RawInputs {
    RawInputs {
        annual_revenue: Some(500_000_000.0),
        monthly_orders: Some(1_500.0),
        avg_order_value: Some(28_000.0),
        labor_cost: Some(3_500_000.0),
        shipping_cost: Some(2_800_000.0),
        error_cost: Some(500_000.0),
        inventory_cost: Some(1_800_000.0),
        investment: Some(25_000_000.0),
        currency: None,
        industry: None,
    }
}

pub fn sample_inputs() -> OperatingInputs {
    OperatingInputs::new(sample_raw_inputs()).unwrap()
}

/// Monte Carlo base of [`sample_inputs`] with the default running-cost rate.
pub fn sample_monte_carlo_base() -> MonteCarloBase {
    MonteCarloBase {
        annual_savings: 44_880_000.0,
        total_costs: 3_750_000.0,
        investment: 25_000_000.0,
    }
}

pub fn sample_results(cache_key: &str) -> Results {
    let config = EngineConfig {
        iterations: 200,
        seed: Some(1),
        ..EngineConfig::default()
    };
    let orchestrator = SimulationOrchestrator::new(config).unwrap();
    let mut results = (*orchestrator.calculate(&sample_inputs(), false)).clone();
    results.cache_key = cache_key.to_string();
    results
}
