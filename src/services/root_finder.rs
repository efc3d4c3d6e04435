//! Newton-Raphson solver for the internal rate of return.

pub const DEFAULT_INITIAL_GUESS: f64 = 0.1;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub initial_guess: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolution {
    pub rate: f64,
    pub iterations: usize,
    /// False when the solver stopped on a flat derivative, left the domain
    /// or ran out of iterations. `rate` is then the last estimate.
    pub converged: bool,
}

/// Net present value of `cash_flows` where index `t` is discounted by
/// `(1 + rate)^t`.
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    let base = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / base.powi(t as i32))
        .sum()
}

fn npv_derivative(rate: f64, cash_flows: &[f64]) -> f64 {
    let base = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, cf)| -(t as f64) * cf / base.powi(t as i32 + 1))
        .sum()
}

/// IRR is only defined for flows with at least one outflow and one inflow.
pub fn has_sign_change(cash_flows: &[f64]) -> bool {
    cash_flows.iter().any(|cf| *cf < 0.0) && cash_flows.iter().any(|cf| *cf > 0.0)
}

/// Runs Newton-Raphson on `NPV(rate) = 0`.
///
/// Never fails: on a flat derivative or after `max_iterations` the last
/// estimate is returned with `converged == false`.
pub fn solve(cash_flows: &[f64], settings: SolverSettings) -> RootSolution {
    let mut rate = settings.initial_guess;

    for iteration in 1..=settings.max_iterations {
        let value = npv(rate, cash_flows);
        let derivative = npv_derivative(rate, cash_flows);
        if derivative.abs() < settings.tolerance {
            return RootSolution {
                rate,
                iterations: iteration,
                converged: false,
            };
        }

        let next = rate - value / derivative;
        if !next.is_finite() || next <= -1.0 {
            return RootSolution {
                rate,
                iterations: iteration,
                converged: false,
            };
        }

        let step = (next - rate).abs();
        rate = next;
        if step < settings.tolerance {
            return RootSolution {
                rate,
                iterations: iteration,
                converged: true,
            };
        }
    }

    RootSolution {
        rate,
        iterations: settings.max_iterations,
        converged: false,
    }
}

/// Internal rate of return, or `None` when the flows have no sign change.
pub fn irr(cash_flows: &[f64], settings: SolverSettings) -> Option<RootSolution> {
    if !has_sign_change(cash_flows) {
        return None;
    }
    Some(solve(cash_flows, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assert_close;

    #[test]
    fn irr_of_single_period_flow_is_exact() {
        let solution = irr(&[-100.0, 150.0], SolverSettings::default()).unwrap();

        assert!(solution.converged);
        assert_close(solution.rate, 0.5, 1e-9);
    }

    #[test]
    fn irr_zeroes_the_npv_of_a_multi_year_flow() {
        let flows = [-1000.0, 300.0, 400.0, 500.0, 200.0];
        let solution = irr(&flows, SolverSettings::default()).unwrap();

        assert!(solution.converged);
        assert_close(npv(solution.rate, &flows), 0.0, 1e-6);
    }

    #[test]
    fn irr_is_undefined_without_a_sign_change() {
        assert_eq!(irr(&[100.0, 50.0], SolverSettings::default()), None);
        assert_eq!(irr(&[-100.0, -50.0], SolverSettings::default()), None);
        assert_eq!(irr(&[], SolverSettings::default()), None);
    }

    #[test]
    fn solve_returns_last_estimate_when_iterations_run_out() {
        let settings = SolverSettings {
            max_iterations: 1,
            ..SolverSettings::default()
        };
        let solution = solve(&[-100.0, 30.0, 30.0, 30.0, 30.0, 30.0], settings);

        assert!(!solution.converged);
        assert_eq!(solution.iterations, 1);
        assert!(solution.rate.is_finite());
    }

    #[test]
    fn solve_stops_on_flat_derivative() {
        // Only a period-0 flow: the derivative is identically zero.
        let solution = solve(&[-100.0], SolverSettings::default());

        assert!(!solution.converged);
        assert_eq!(solution.rate, DEFAULT_INITIAL_GUESS);
        assert_eq!(solution.iterations, 1);
    }

    #[test]
    fn npv_discounts_by_period_index() {
        assert_close(npv(0.1, &[-100.0, 110.0]), 0.0, 1e-12);
        assert_close(npv(0.0, &[-100.0, 40.0, 60.0]), 0.0, 1e-12);
    }
}
