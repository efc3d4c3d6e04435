use std::num::NonZeroUsize;

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};
use thiserror::Error;

use crate::domain::scenario::Scenario;
use crate::services::percentiles::{interval_sorted, median_sorted, value_f64_sorted};
use crate::services::scenario_table::ScenarioTable;
use crate::services::simulation_types::{
    ConfidenceInterval, PaybackStatistics, RoiHistogram, RoiStatistics, ScenarioShare,
    SimulationStatistics,
};

/// Noise factors are clamped to this floor so a trial never sees negative
/// revenue or cost.
pub const NOISE_FLOOR: f64 = 0.001;
pub const HISTOGRAM_BINS: usize = 20;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("quick mode iteration cap must be greater than zero")]
    InvalidQuickModeCap,
    #[error("invalid noise standard deviation for {name}: {value}")]
    InvalidNoise { name: &'static str, value: f64 },
    #[error("payback bound must be positive: {0}")]
    InvalidPaybackBound(f64),
    #[error("scenario table is empty")]
    EmptyScenarioTable,
}

/// Base figures every trial perturbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloBase {
    pub annual_savings: f64,
    pub total_costs: f64,
    pub investment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloSettings {
    pub quick_mode_iterations: usize,
    pub revenue_noise_std: f64,
    pub cost_noise_std: f64,
    pub payback_bound_months: f64,
    pub confidence_level: f64,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            quick_mode_iterations: 1000,
            revenue_noise_std: 0.10,
            cost_noise_std: 0.05,
            payback_bound_months: 100.0,
            confidence_level: 0.95,
        }
    }
}

/// Trials as parallel buffers, one entry per trial.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrialBatch {
    pub scenario_index: Vec<usize>,
    pub revenue: Vec<f64>,
    pub cost: Vec<f64>,
    pub roi_pct: Vec<f64>,
    pub payback_months: Vec<f64>,
}

impl TrialBatch {
    pub fn len(&self) -> usize {
        self.roi_pct.len()
    }
}

#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    scenarios: Vec<Scenario>,
    cumulative_weights: Vec<f64>,
    revenue_noise: Normal<f64>,
    cost_noise: Normal<f64>,
    settings: MonteCarloSettings,
}

impl MonteCarloSimulator {
    pub fn new(
        table: &ScenarioTable,
        settings: MonteCarloSettings,
    ) -> Result<Self, SimulationError> {
        if table.scenarios().is_empty() {
            return Err(SimulationError::EmptyScenarioTable);
        }
        if settings.quick_mode_iterations == 0 {
            return Err(SimulationError::InvalidQuickModeCap);
        }
        if !(settings.payback_bound_months > 0.0) {
            return Err(SimulationError::InvalidPaybackBound(
                settings.payback_bound_months,
            ));
        }
        let revenue_noise = noise_distribution("revenue", settings.revenue_noise_std)?;
        let cost_noise = noise_distribution("cost", settings.cost_noise_std)?;

        Ok(Self {
            scenarios: table.scenarios().to_vec(),
            cumulative_weights: table.cumulative_weights(),
            revenue_noise,
            cost_noise,
            settings,
        })
    }

    /// Number of trials a run will actually perform.
    pub fn effective_iterations(&self, requested: NonZeroUsize, quick_mode: bool) -> usize {
        if quick_mode {
            requested.get().min(self.settings.quick_mode_iterations)
        } else {
            requested.get()
        }
    }

    pub fn simulate<R: Rng + ?Sized>(
        &self,
        base: MonteCarloBase,
        iterations: NonZeroUsize,
        quick_mode: bool,
        rng: &mut R,
    ) -> SimulationStatistics {
        let trials = self.effective_iterations(iterations, quick_mode);
        tracing::debug!(
            requested = iterations.get(),
            trials,
            quick_mode,
            "running monte carlo simulation"
        );

        let batch = self.generate_batch(base, trials, rng);
        self.aggregate(&batch, iterations.get(), quick_mode)
    }

    pub(crate) fn generate_batch<R: Rng + ?Sized>(
        &self,
        base: MonteCarloBase,
        trials: usize,
        rng: &mut R,
    ) -> TrialBatch {
        let uniform = Uniform::new(0.0, 1.0);
        let draws: Vec<f64> = (0..trials).map(|_| uniform.sample(rng)).collect();
        let revenue_noise: Vec<f64> = (0..trials)
            .map(|_| self.revenue_noise.sample(rng).max(NOISE_FLOOR))
            .collect();
        let cost_noise: Vec<f64> = (0..trials)
            .map(|_| self.cost_noise.sample(rng).max(NOISE_FLOOR))
            .collect();

        let scenario_index = select_scenarios(&self.cumulative_weights, &draws);

        let revenue: Vec<f64> = scenario_index
            .iter()
            .zip(&revenue_noise)
            .map(|(index, noise)| {
                base.annual_savings * self.scenarios[*index].revenue_impact * noise
            })
            .collect();
        let cost: Vec<f64> = scenario_index
            .iter()
            .zip(&cost_noise)
            .map(|(index, noise)| base.total_costs * self.scenarios[*index].cost_impact * noise)
            .collect();

        let investment = base.investment;
        let (roi_values, payback_values): (Vec<f64>, Vec<f64>) = revenue
            .iter()
            .zip(&cost)
            .map(|(revenue, cost)| {
                let annual_benefit = revenue - cost;
                (
                    roi_pct(annual_benefit, investment),
                    payback_months(annual_benefit, investment),
                )
            })
            .unzip();

        TrialBatch {
            scenario_index,
            revenue,
            cost,
            roi_pct: roi_values,
            payback_months: payback_values,
        }
    }

    fn aggregate(
        &self,
        batch: &TrialBatch,
        requested_iterations: usize,
        quick_mode: bool,
    ) -> SimulationStatistics {
        let trials = batch.len();
        let bound = self.settings.payback_bound_months;

        // Single pass: Welford mean/variance, extremes, counts, bounded paybacks.
        let mut mean = 0.0_f64;
        let mut m2 = 0.0_f64;
        let mut benefit_sum = 0.0_f64;
        let mut worst = f64::INFINITY;
        let mut best = f64::NEG_INFINITY;
        let mut positive = 0usize;
        let mut occurrences = vec![0usize; self.scenarios.len()];
        let mut bounded_paybacks = Vec::with_capacity(trials);

        for (n, (((roi, payback), scenario), (revenue, cost))) in batch
            .roi_pct
            .iter()
            .zip(&batch.payback_months)
            .zip(&batch.scenario_index)
            .zip(batch.revenue.iter().zip(&batch.cost))
            .enumerate()
        {
            benefit_sum += revenue - cost;
            let delta = *roi - mean;
            mean += delta / (n + 1) as f64;
            m2 += delta * (*roi - mean);
            worst = worst.min(*roi);
            best = best.max(*roi);
            if *roi > 0.0 {
                positive += 1;
            }
            occurrences[*scenario] += 1;
            if *payback <= bound {
                bounded_paybacks.push(*payback);
            }
        }

        let mut sorted_roi = batch.roi_pct.clone();
        sorted_roi.sort_by(|a, b| a.total_cmp(b));
        bounded_paybacks.sort_by(|a, b| a.total_cmp(b));

        let (lower, upper) = interval_sorted(&sorted_roi, self.settings.confidence_level);
        let trials_f = trials.max(1) as f64;

        let payback = if bounded_paybacks.is_empty() {
            PaybackStatistics {
                mean_months: f64::INFINITY,
                median_months: f64::INFINITY,
                bound_months: bound,
                within_bound_share: 0.0,
            }
        } else {
            PaybackStatistics {
                mean_months: bounded_paybacks.iter().sum::<f64>()
                    / bounded_paybacks.len() as f64,
                median_months: median_sorted(&bounded_paybacks),
                bound_months: bound,
                within_bound_share: bounded_paybacks.len() as f64 / trials_f,
            }
        };

        let scenario_distribution = self
            .scenarios
            .iter()
            .zip(occurrences)
            .map(|(scenario, count)| ScenarioShare {
                scenario: scenario.kind,
                occurrences: count,
                percentage: count as f64 / trials_f * 100.0,
            })
            .collect();

        SimulationStatistics {
            requested_iterations,
            iterations: trials,
            quick_mode,
            mean_annual_benefit: benefit_sum / trials_f,
            roi_pct: RoiStatistics {
                mean,
                median: median_sorted(&sorted_roi),
                std_dev: (m2 / trials_f).sqrt(),
                p5: value_f64_sorted(&sorted_roi, 5.0),
                p95: value_f64_sorted(&sorted_roi, 95.0),
                worst_case: if trials == 0 { 0.0 } else { worst },
                best_case: if trials == 0 { 0.0 } else { best },
            },
            confidence_interval: ConfidenceInterval {
                level: self.settings.confidence_level,
                lower,
                upper,
            },
            probability_positive_roi: positive as f64 / trials_f,
            payback,
            scenario_distribution,
            histogram: histogram_sorted(&sorted_roi, HISTOGRAM_BINS),
        }
    }
}

fn noise_distribution(name: &'static str, std_dev: f64) -> Result<Normal<f64>, SimulationError> {
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(SimulationError::InvalidNoise {
            name,
            value: std_dev,
        });
    }
    Normal::new(1.0, std_dev).map_err(|_| SimulationError::InvalidNoise {
        name,
        value: std_dev,
    })
}

/// Inverse-CDF scenario selection over the whole draw buffer: each draw maps
/// to the first scenario whose cumulative weight exceeds it. Draws past the
/// final cumulative weight land in the last scenario.
pub(crate) fn select_scenarios(cumulative_weights: &[f64], draws: &[f64]) -> Vec<usize> {
    let last = cumulative_weights.len().saturating_sub(1);
    draws
        .iter()
        .map(|draw| {
            cumulative_weights
                .partition_point(|weight| *weight <= *draw)
                .min(last)
        })
        .collect()
}

/// `(benefit - investment) / investment * 100`, or 0 when there is no
/// investment to relate to.
pub fn roi_pct(annual_benefit: f64, investment: f64) -> f64 {
    if investment <= 0.0 {
        return 0.0;
    }
    (annual_benefit - investment) / investment * 100.0
}

/// Months until `annual_benefit` covers `investment`; `+inf` when the
/// benefit is not positive.
pub fn payback_months(annual_benefit: f64, investment: f64) -> f64 {
    if annual_benefit <= 0.0 {
        return f64::INFINITY;
    }
    investment / (annual_benefit / 12.0)
}

/// Break-even point of the deterministic model. With nothing invested there
/// is nothing to recover, so it is month 0 even when savings are zero.
pub fn break_even_months(annual_savings: f64, investment: f64) -> f64 {
    if investment <= 0.0 {
        return 0.0;
    }
    payback_months(annual_savings, investment)
}

fn histogram_sorted(sorted_values: &[f64], bins: usize) -> RoiHistogram {
    let (Some(min), Some(max)) = (sorted_values.first(), sorted_values.last()) else {
        return RoiHistogram {
            bin_edges: Vec::new(),
            counts: Vec::new(),
        };
    };
    let range = max - min;
    if range <= f64::EPSILON || bins == 0 {
        return RoiHistogram {
            bin_edges: vec![*min, *max],
            counts: vec![sorted_values.len()],
        };
    }

    let width = range / bins as f64;
    let bin_edges = (0..=bins).map(|i| min + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for value in sorted_values {
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    RoiHistogram { bin_edges, counts }
}
