use crate::domain::results::ScenarioOutcome;
use crate::domain::scenario::Scenario;
use crate::services::calculation_report::CalculationReport;

pub fn format_calculation_report(report: &CalculationReport) -> String {
    let results = &report.results;
    let metrics = &results.key_metrics;
    let currency = &results.currency;
    let mc = &results.monte_carlo;

    let mut lines = Vec::new();
    lines.push("ROI Forecast".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("Start date: {}", report.start_date));
    lines.push(format!("Currency: {currency}"));
    lines.push(format!(
        "Annual savings: {:.0} ({:.1}% of current costs)",
        metrics.annual_savings, metrics.cost_reduction_pct
    ));
    lines.push(format!("First-year ROI: {:.1}%", metrics.first_year_roi_pct));
    lines.push(format!("Payback: {}", format_months(metrics.payback_months)));
    lines.push(format!(
        "Break-even date: {}",
        report.break_even_date.as_deref().unwrap_or("n/a")
    ));
    lines.push(String::new());
    lines.push("Scenarios:".to_string());
    lines.push("Scenario | Probability | ROI | Payback".to_string());
    lines.push("---------|-------------|-----|--------".to_string());
    lines.extend(results.scenarios.iter().map(format_scenario_row));
    lines.push(String::new());
    lines.push(format!(
        "Monte Carlo ({} iterations{}):",
        mc.iterations,
        if mc.quick_mode { ", quick mode" } else { "" }
    ));
    lines.push(format!(
        "Mean ROI: {:.1}% (median {:.1}%, std-dev {:.1})",
        mc.roi_pct.mean, mc.roi_pct.median, mc.roi_pct.std_dev
    ));
    lines.push(format!(
        "P5..P95: {:.1}% .. {:.1}%",
        mc.roi_pct.p5, mc.roi_pct.p95
    ));
    lines.push(format!(
        "Probability of positive ROI: {:.1}%",
        mc.probability_positive_roi * 100.0
    ));
    lines.push(String::new());
    lines.push(format!(
        "{}-year cumulative ROI: {:.1}%",
        results.projections.years.len(),
        results.projections.final_cumulative_roi_pct
    ));
    lines.push(format!("NPV: {:.0}", results.financial.npv));
    lines.push(format!(
        "IRR: {}",
        format_irr(results.financial.irr, results.financial.irr_approximate)
    ));

    lines.join("\n")
}

pub fn format_scenario_table(scenarios: &[Scenario], weight_sum: f64, consistent: bool) -> String {
    let mut lines = Vec::new();
    lines.push("Scenario | Probability | Revenue impact | Cost impact | Timeline".to_string());
    lines.push("---------|-------------|----------------|-------------|---------".to_string());
    for scenario in scenarios {
        lines.push(format!(
            "{} | {:.2} | {:.2} | {:.2} | {} months",
            scenario.kind.name(),
            scenario.probability,
            scenario.revenue_impact,
            scenario.cost_impact,
            scenario.timeline_months
        ));
    }
    lines.push(format!(
        "Weight sum: {weight_sum:.3} ({})",
        if consistent { "ok" } else { "outside 0.99..1.01" }
    ));
    lines.join("\n")
}

fn format_scenario_row(outcome: &ScenarioOutcome) -> String {
    format!(
        "{} | {:.0}% | {:.1}% | {}",
        outcome.scenario.name(),
        outcome.probability * 100.0,
        outcome.roi_pct,
        format_months(outcome.payback_months)
    )
}

fn format_months(months: f64) -> String {
    if months.is_finite() {
        format!("{months:.1} months")
    } else {
        "never".to_string()
    }
}

fn format_irr(irr: Option<f64>, approximate: bool) -> String {
    match irr {
        Some(rate) if approximate => format!("~{:.1}% (approximate)", rate * 100.0),
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "n/a".to_string(),
    }
}
