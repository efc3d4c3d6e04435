use std::sync::Arc;

use thiserror::Error;

use crate::domain::costs::SavingsBreakdown;
use crate::domain::inputs::{InputError, OperatingInputs, RawInputs};
use crate::domain::results::{FinancialMetrics, KeyMetrics, Results, ScenarioOutcome};
use crate::services::cost_model::{
    REDUCTION_RATES, REDUCTION_TABLE_VERSION, current_costs, optimized_costs, savings,
};
use crate::services::engine_config::{EngineConfig, EngineConfigError};
use crate::services::projection::project;
use crate::services::random_source::{RandomSource, SeededSource};
use crate::services::recommendations::{RiskSignals, recommend};
use crate::services::result_cache::ResultCache;
use crate::services::root_finder::{SolverSettings, irr, npv};
use crate::services::scenario_table::{ScenarioTable, apply};
use crate::services::simulation::{
    MonteCarloBase, MonteCarloSimulator, SimulationError, break_even_months, roi_pct,
};

#[derive(Error, Debug)]
pub enum CalculationError {
    #[error("invalid inputs: {0}")]
    Input(#[from] InputError),
    #[error("invalid engine configuration: {0}")]
    Config(#[from] EngineConfigError),
    #[error("invalid simulation settings: {0}")]
    Simulation(#[from] SimulationError),
}

/// Runs the full pipeline and memoizes results per normalized input.
///
/// Safe to share across threads: the cache is the only mutable state and
/// each run draws from its own random stream.
pub struct SimulationOrchestrator<S: RandomSource = SeededSource> {
    config: EngineConfig,
    scenarios: ScenarioTable,
    simulator: MonteCarloSimulator,
    cache: ResultCache,
    random: S,
}

impl SimulationOrchestrator<SeededSource> {
    pub fn new(config: EngineConfig) -> Result<Self, CalculationError> {
        let random = SeededSource::new(config.seed);
        Self::with_parts(config, ScenarioTable::default(), random)
    }
}

impl<S: RandomSource> SimulationOrchestrator<S> {
    pub fn with_parts(
        config: EngineConfig,
        scenarios: ScenarioTable,
        random: S,
    ) -> Result<Self, CalculationError> {
        config.validate()?;
        scenarios.check_weights();
        let simulator = MonteCarloSimulator::new(&scenarios, config.monte_carlo_settings())?;
        tracing::info!(
            reduction_table_version = REDUCTION_TABLE_VERSION,
            reduction_rates = ?REDUCTION_RATES,
            cache_capacity = config.cache_capacity,
            "simulation orchestrator ready"
        );

        Ok(Self {
            cache: ResultCache::new(config.cache_capacity),
            config,
            scenarios,
            simulator,
            random,
        })
    }

    pub fn scenarios(&self) -> &ScenarioTable {
        &self.scenarios
    }

    /// Validates `raw` and calculates. Nothing runs on invalid inputs.
    pub fn calculate_raw(
        &self,
        raw: RawInputs,
        quick_mode: bool,
    ) -> Result<Arc<Results>, CalculationError> {
        let inputs = OperatingInputs::new(raw)?;
        Ok(self.calculate(&inputs, quick_mode))
    }

    pub fn calculate(&self, inputs: &OperatingInputs, quick_mode: bool) -> Arc<Results> {
        let key = cache_key(inputs, quick_mode);
        if let Some(results) = self.cache.get(&key) {
            tracing::debug!(cache_key = %key, "result cache hit");
            return results;
        }
        tracing::debug!(cache_key = %key, "result cache miss");
        self.cache
            .get_or_compute(key.clone(), || self.compute(inputs, quick_mode, key))
    }

    fn compute(&self, inputs: &OperatingInputs, quick_mode: bool, cache_key: String) -> Results {
        let investment = inputs.investment();
        let current = current_costs(inputs);
        let optimized = optimized_costs(&current);
        let savings = savings(&current, &optimized);
        let key_metrics = key_metrics(inputs, current.total_annual, &savings);

        let scenarios = self
            .scenarios
            .scenarios()
            .iter()
            .map(|scenario| {
                let adjusted = apply(scenario, savings.total_annual, investment);
                ScenarioOutcome {
                    scenario: scenario.kind,
                    probability: scenario.probability,
                    annual_savings: adjusted.annual_savings,
                    investment: adjusted.investment,
                    roi_pct: roi_pct(adjusted.annual_savings, adjusted.investment),
                    payback_months: break_even_months(adjusted.annual_savings, adjusted.investment),
                    timeline_months: scenario.timeline_months,
                }
            })
            .collect();

        let base = MonteCarloBase {
            annual_savings: savings.total_annual,
            total_costs: investment * self.config.running_cost_rate,
            investment,
        };
        let mut rng = self.random.stream();
        let monte_carlo =
            self.simulator
                .simulate(base, self.config.iterations(), quick_mode, &mut rng);
        tracing::info!(
            iterations = monte_carlo.iterations,
            quick_mode,
            mean_roi_pct = monte_carlo.roi_pct.mean,
            "monte carlo simulation finished"
        );

        let projections = project(
            savings.total_annual,
            investment,
            self.config.projection_years,
            self.config.inflation_rate,
        );
        let financial = financial_metrics(
            investment,
            projections.years.iter().map(|year| year.annual_savings),
            self.config.discount_rate,
        );

        let recommendations = recommend(
            &savings,
            RiskSignals {
                probability_positive_roi: monte_carlo.probability_positive_roi,
                payback_months: key_metrics.payback_months,
                horizon_months: f64::from(self.config.projection_years) * 12.0,
            },
        );

        Results {
            cache_key,
            currency: inputs.currency().to_string(),
            industry: inputs.industry().map(str::to_string),
            reduction_table_version: REDUCTION_TABLE_VERSION.to_string(),
            current_costs: current,
            optimized_costs: optimized,
            savings,
            key_metrics,
            scenarios,
            monte_carlo,
            projections,
            financial,
            recommendations,
        }
    }
}

/// Canonical key: inputs as JSON with sorted keys, plus the quick-mode flag.
pub fn cache_key(inputs: &OperatingInputs, quick_mode: bool) -> String {
    let canonical = match serde_json::to_value(inputs) {
        Ok(value) => value.to_string(),
        Err(_) => format!("{inputs:?}"),
    };
    format!("{canonical}|quick={quick_mode}")
}

fn key_metrics(
    inputs: &OperatingInputs,
    current_annual_costs: f64,
    savings: &SavingsBreakdown,
) -> KeyMetrics {
    let investment = inputs.investment();
    let payback = break_even_months(savings.total_annual, investment);
    KeyMetrics {
        monthly_savings: savings.total_monthly,
        annual_savings: savings.total_annual,
        first_year_roi_pct: roi_pct(savings.total_annual, investment),
        payback_months: payback,
        cost_reduction_pct: share_pct(savings.total_annual, current_annual_costs),
        savings_per_order: if inputs.monthly_orders() > 0.0 {
            savings.total_monthly / inputs.monthly_orders()
        } else {
            0.0
        },
        savings_to_revenue_pct: share_pct(savings.total_annual, inputs.annual_revenue()),
    }
}

fn share_pct(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

fn financial_metrics(
    investment: f64,
    period_flows: impl Iterator<Item = f64>,
    discount_rate: f64,
) -> FinancialMetrics {
    let cash_flows: Vec<f64> = std::iter::once(-investment).chain(period_flows).collect();
    let solution = irr(&cash_flows, SolverSettings::default());
    if let Some(solution) = solution.filter(|s| !s.converged) {
        tracing::warn!(
            rate = solution.rate,
            iterations = solution.iterations,
            "IRR did not converge, reporting last estimate"
        );
    }

    FinancialMetrics {
        npv: npv(discount_rate, &cash_flows),
        discount_rate,
        irr: solution.map(|s| s.rate),
        irr_approximate: solution.is_some_and(|s| !s.converged),
        irr_iterations: solution.map(|s| s.iterations).unwrap_or(0),
        cash_flows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scenario::ScenarioKind;
    use crate::test_support::{CountingSource, assert_close, sample_inputs, sample_raw_inputs};
    use std::sync::atomic::Ordering;

    fn seeded_config() -> EngineConfig {
        EngineConfig {
            iterations: 4000,
            seed: Some(2024),
            ..EngineConfig::default()
        }
    }

    fn counting_orchestrator() -> SimulationOrchestrator<CountingSource> {
        SimulationOrchestrator::with_parts(
            seeded_config(),
            ScenarioTable::default(),
            CountingSource::new(2024),
        )
        .unwrap()
    }

    #[test]
    fn end_to_end_sample_engagement() {
        let orchestrator = SimulationOrchestrator::new(seeded_config()).unwrap();
        let results = orchestrator.calculate(&sample_inputs(), false);

        assert!(results.key_metrics.first_year_roi_pct > 0.0);
        assert_close(results.key_metrics.first_year_roi_pct, 79.52, 1e-9);
        assert!(results.key_metrics.payback_months.is_finite());
        assert_close(results.key_metrics.payback_months, 25.0 / 3.74, 1e-9);

        let pessimistic = results.scenario(ScenarioKind::Pessimistic).unwrap().roi_pct;
        let realistic = results.scenario(ScenarioKind::Realistic).unwrap().roi_pct;
        let optimistic = results.scenario(ScenarioKind::Optimistic).unwrap().roi_pct;
        assert!(pessimistic < realistic);
        assert!(realistic < optimistic);

        assert_eq!(results.monte_carlo.iterations, 4000);
        assert_eq!(results.projections.years.len(), 5);
        assert_eq!(results.financial.cash_flows.len(), 6);
        assert_eq!(results.financial.cash_flows[0], -25_000_000.0);
        assert!(results.financial.npv > 0.0);
        assert!(results.financial.irr.unwrap() > 0.0);
        assert!(!results.financial.irr_approximate);
        assert_eq!(results.reduction_table_version, REDUCTION_TABLE_VERSION);
        assert!(!results.recommendations.is_empty());
    }

    #[test]
    fn identical_seed_gives_identical_statistics() {
        let inputs = sample_inputs();
        let first = SimulationOrchestrator::new(seeded_config())
            .unwrap()
            .calculate(&inputs, false);
        let second = SimulationOrchestrator::new(seeded_config())
            .unwrap()
            .calculate(&inputs, false);

        assert_eq!(first.monte_carlo, second.monte_carlo);
        assert_eq!(*first, *second);
    }

    #[test]
    fn repeated_calculation_is_served_from_cache() {
        let orchestrator = counting_orchestrator();
        let inputs = sample_inputs();

        let first = orchestrator.calculate(&inputs, false);
        let second = orchestrator.calculate(&inputs, false);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(orchestrator.random.streams.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn quick_mode_is_part_of_the_key() {
        let orchestrator = counting_orchestrator();
        let inputs = sample_inputs();

        let full = orchestrator.calculate(&inputs, false);
        let quick = orchestrator.calculate(&inputs, true);

        assert_ne!(full.cache_key, quick.cache_key);
        assert_eq!(quick.monte_carlo.iterations, 1000);
        assert_eq!(orchestrator.random.streams.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cache_key_is_stable_and_sorted() {
        let key = cache_key(&sample_inputs(), true);

        assert_eq!(key, cache_key(&sample_inputs(), true));
        assert!(key.ends_with("|quick=true"));
        let annual = key.find("\"annual_revenue\"").unwrap();
        let investment = key.find("\"investment\"").unwrap();
        assert!(annual < investment);
    }

    #[test]
    fn invalid_inputs_never_reach_the_engine() {
        let orchestrator = counting_orchestrator();
        let mut raw = sample_raw_inputs();
        raw.error_cost = Some(-5.0);

        let error = orchestrator.calculate_raw(raw, false).unwrap_err();
        assert!(matches!(
            error,
            CalculationError::Input(InputError::NegativeValue {
                field: "error_cost",
                ..
            })
        ));
        assert_eq!(orchestrator.random.streams.load(Ordering::SeqCst), 0);
        assert!(orchestrator.cache.is_empty());
    }

    #[test]
    fn zero_investment_is_absorbed_into_sentinels() {
        let orchestrator = counting_orchestrator();
        let mut raw = sample_raw_inputs();
        raw.investment = Some(0.0);

        let results = orchestrator.calculate_raw(raw, true).unwrap();
        assert_eq!(results.key_metrics.first_year_roi_pct, 0.0);
        assert_eq!(results.key_metrics.payback_months, 0.0);
        assert_eq!(results.financial.irr, None);
        assert!(!results.financial.irr_approximate);
    }

    #[test]
    fn zero_costs_give_infinite_payback() {
        let orchestrator = counting_orchestrator();
        let raw = RawInputs {
            labor_cost: Some(0.0),
            shipping_cost: Some(0.0),
            error_cost: Some(0.0),
            inventory_cost: Some(0.0),
            ..sample_raw_inputs()
        };

        let results = orchestrator.calculate_raw(raw, true).unwrap();
        assert!(results.key_metrics.payback_months.is_infinite());
        assert_eq!(results.key_metrics.cost_reduction_pct, 0.0);
        assert_eq!(results.financial.irr, None);
        assert!(results.monte_carlo.payback.mean_months.is_infinite());
    }

    #[test]
    fn zero_costs_and_zero_investment_agree_on_break_even() {
        let orchestrator = counting_orchestrator();
        let raw = RawInputs {
            labor_cost: Some(0.0),
            shipping_cost: Some(0.0),
            error_cost: Some(0.0),
            inventory_cost: Some(0.0),
            investment: Some(0.0),
            ..sample_raw_inputs()
        };

        let results = orchestrator.calculate_raw(raw, true).unwrap();
        assert_eq!(results.key_metrics.payback_months, 0.0);
        assert_eq!(
            results.key_metrics.payback_months,
            results.projections.break_even_month
        );
        assert!(
            results
                .scenarios
                .iter()
                .all(|outcome| outcome.payback_months == 0.0)
        );
    }

    #[test]
    fn concurrent_callers_share_one_result() {
        let orchestrator = Arc::new(counting_orchestrator());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let orchestrator = Arc::clone(&orchestrator);
                std::thread::spawn(move || orchestrator.calculate(&sample_inputs(), true))
            })
            .collect();
        let results: Vec<Arc<Results>> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
        assert_eq!(orchestrator.random.streams.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_callers_with_distinct_inputs_do_not_interfere() {
        let engagements: Vec<OperatingInputs> = [10.0, 20.0, 30.0, 40.0]
            .into_iter()
            .map(|millions| {
                OperatingInputs::new(RawInputs {
                    investment: Some(millions * 1_000_000.0),
                    ..sample_raw_inputs()
                })
                .unwrap()
            })
            .collect();

        let serial = counting_orchestrator();
        let expected: Vec<Arc<Results>> = engagements
            .iter()
            .map(|inputs| serial.calculate(inputs, true))
            .collect();

        let orchestrator = Arc::new(counting_orchestrator());
        let handles: Vec<_> = engagements
            .iter()
            .cloned()
            .map(|inputs| {
                let orchestrator = Arc::clone(&orchestrator);
                std::thread::spawn(move || orchestrator.calculate(&inputs, true))
            })
            .collect();
        let results: Vec<Arc<Results>> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        for (actual, expected) in results.iter().zip(&expected) {
            assert_eq!(**actual, **expected);
        }
        assert_eq!(
            orchestrator.random.streams.load(Ordering::SeqCst),
            engagements.len()
        );
        assert_eq!(orchestrator.cache.len(), engagements.len() as u64);
    }

    #[test]
    fn financial_metrics_flag_missing_irr() {
        let metrics = financial_metrics(100.0, [-10.0, -10.0].into_iter(), 0.1);
        assert_eq!(metrics.irr, None);
        assert_eq!(metrics.cash_flows, vec![-100.0, -10.0, -10.0]);
        assert!(metrics.npv < 0.0);
    }
}
