use crate::domain::projection::{ProjectionSummary, ProjectionYear};
use crate::services::simulation::break_even_months;

/// Compounds first-year savings over `years` periods.
///
/// Year `k` (starting at 1) saves `base_savings * (1 + inflation_rate)^k`.
/// Only year 1 carries the one-time investment.
pub fn project(
    base_savings: f64,
    investment: f64,
    years: u32,
    inflation_rate: f64,
) -> ProjectionSummary {
    let growth = 1.0 + inflation_rate;
    let mut cumulative_savings = 0.0;
    let mut cumulative_net_benefit = 0.0;
    let mut rows = Vec::with_capacity(years as usize);

    for year in 1..=years {
        let annual_savings = base_savings * growth.powi(year as i32);
        let net_benefit = if year == 1 {
            annual_savings - investment
        } else {
            annual_savings
        };
        cumulative_savings += annual_savings;
        cumulative_net_benefit += net_benefit;

        rows.push(ProjectionYear {
            year,
            annual_savings,
            cumulative_savings,
            net_benefit,
            cumulative_net_benefit,
            cumulative_roi_pct: ratio_pct(cumulative_net_benefit, investment),
        });
    }

    let final_cumulative_roi_pct = rows
        .last()
        .map(|row| row.cumulative_roi_pct)
        .unwrap_or(0.0);

    ProjectionSummary {
        years: rows,
        inflation_rate,
        total_savings: cumulative_savings,
        final_cumulative_roi_pct,
        break_even_month: break_even_months(base_savings, investment),
    }
}

fn ratio_pct(value: f64, investment: f64) -> f64 {
    if investment <= 0.0 {
        return 0.0;
    }
    value / investment * 100.0
}
