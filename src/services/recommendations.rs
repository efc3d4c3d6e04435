use crate::domain::costs::{CategorySavings, CostCategory, SavingsBreakdown};
use crate::domain::results::{Priority, Recommendation};

pub const HIGH_PRIORITY_SHARE: f64 = 0.40;
pub const MEDIUM_PRIORITY_SHARE: f64 = 0.15;
pub const RISK_PROBABILITY_THRESHOLD: f64 = 0.80;

/// Signals beyond the savings breakdown that shape the advice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskSignals {
    pub probability_positive_roi: f64,
    pub payback_months: f64,
    pub horizon_months: f64,
}

pub fn recommend(savings: &SavingsBreakdown, signals: RiskSignals) -> Vec<Recommendation> {
    let mut categories: Vec<(CostCategory, CategorySavings)> = savings
        .iter()
        .filter(|(_, saved)| saved.annual > 0.0)
        .collect();
    categories.sort_by(|a, b| b.1.annual.total_cmp(&a.1.annual));

    let mut recommendations: Vec<Recommendation> = categories
        .into_iter()
        .map(|(category, saved)| {
            let share = if savings.total_annual > 0.0 {
                saved.annual / savings.total_annual
            } else {
                0.0
            };
            Recommendation {
                category: Some(category),
                priority: priority_for_share(share),
                annual_savings: saved.annual,
                message: format!(
                    "{}: target a {:.0}% reduction, worth {:.0} per year ({:.0}% of total savings)",
                    category.label(),
                    saved.reduction_rate * 100.0,
                    saved.annual,
                    share * 100.0
                ),
            }
        })
        .collect();

    if signals.probability_positive_roi < RISK_PROBABILITY_THRESHOLD {
        recommendations.push(Recommendation {
            category: None,
            priority: Priority::High,
            annual_savings: 0.0,
            message: format!(
                "Only {:.0}% of simulated outcomes return a positive ROI; phase the investment",
                signals.probability_positive_roi * 100.0
            ),
        });
    }
    if signals.payback_months > signals.horizon_months {
        recommendations.push(Recommendation {
            category: None,
            priority: Priority::Medium,
            annual_savings: 0.0,
            message: format!(
                "Payback exceeds the {:.0}-month projection horizon",
                signals.horizon_months
            ),
        });
    }

    recommendations
}

fn priority_for_share(share: f64) -> Priority {
    if share >= HIGH_PRIORITY_SHARE {
        Priority::High
    } else if share >= MEDIUM_PRIORITY_SHARE {
        Priority::Medium
    } else {
        Priority::Low
    }
}
