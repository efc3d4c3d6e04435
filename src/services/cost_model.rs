use crate::domain::costs::{
    CategoryCost, CategorySavings, CostBreakdown, CostCategory, SavingsBreakdown,
};
use crate::domain::inputs::OperatingInputs;

/// Version of [`REDUCTION_RATES`]. Bump whenever a rate changes so reports
/// stay reproducible.
pub const REDUCTION_TABLE_VERSION: &str = "2024.1";

/// Fixed share of each category's cost removed by the optimization.
pub const REDUCTION_RATES: [(CostCategory, f64); 4] = [
    (CostCategory::Labor, 0.60),
    (CostCategory::Shipping, 0.25),
    (CostCategory::Errors, 0.80),
    (CostCategory::Inventory, 0.30),
];

pub fn reduction_rate(category: CostCategory) -> f64 {
    REDUCTION_RATES
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map(|(_, rate)| *rate)
        .unwrap_or(0.0)
}

pub fn current_costs(inputs: &OperatingInputs) -> CostBreakdown {
    let monthly = inputs.monthly_costs();
    CostBreakdown::from_categories(
        CategoryCost::from_monthly(monthly.labor),
        CategoryCost::from_monthly(monthly.shipping),
        CategoryCost::from_monthly(monthly.errors),
        CategoryCost::from_monthly(monthly.inventory),
    )
}

pub fn optimized_costs(current: &CostBreakdown) -> CostBreakdown {
    let reduce = |category: CostCategory| {
        let cost = current.category(category);
        CategoryCost::from_monthly(cost.monthly * (1.0 - reduction_rate(category)))
    };
    CostBreakdown::from_categories(
        reduce(CostCategory::Labor),
        reduce(CostCategory::Shipping),
        reduce(CostCategory::Errors),
        reduce(CostCategory::Inventory),
    )
}

pub fn savings(current: &CostBreakdown, optimized: &CostBreakdown) -> SavingsBreakdown {
    let saved = |category: CostCategory| {
        let before = current.category(category);
        let after = optimized.category(category);
        if before.monthly == 0.0 {
            return CategorySavings {
                monthly: 0.0,
                annual: 0.0,
                reduction_rate: reduction_rate(category),
            };
        }
        CategorySavings {
            monthly: before.monthly - after.monthly,
            annual: before.annual - after.annual,
            reduction_rate: reduction_rate(category),
        }
    };

    let total_annual = current.total_annual - optimized.total_annual;
    SavingsBreakdown {
        labor: saved(CostCategory::Labor),
        shipping: saved(CostCategory::Shipping),
        errors: saved(CostCategory::Errors),
        inventory: saved(CostCategory::Inventory),
        total_monthly: total_annual / 12.0,
        total_annual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inputs::RawInputs;
    use crate::test_support::{assert_close, sample_inputs};
    use proptest::prelude::*;

    #[test]
    fn current_costs_annualizes_each_category() {
        let current = current_costs(&sample_inputs());

        assert_eq!(current.labor.annual, 42_000_000.0);
        assert_eq!(current.shipping.annual, 33_600_000.0);
        assert_eq!(current.errors.annual, 6_000_000.0);
        assert_eq!(current.inventory.annual, 21_600_000.0);
        assert_eq!(current.total_annual, 103_200_000.0);
        assert_eq!(current.total_monthly, 8_600_000.0);
    }

    #[test]
    fn optimized_costs_apply_the_reduction_table() {
        let current = current_costs(&sample_inputs());
        let optimized = optimized_costs(&current);

        assert_close(optimized.labor.monthly, 1_400_000.0, 1e-6);
        assert_close(optimized.shipping.monthly, 2_100_000.0, 1e-6);
        assert_close(optimized.errors.monthly, 100_000.0, 1e-6);
        assert_close(optimized.inventory.monthly, 1_260_000.0, 1e-6);
    }

    #[test]
    fn savings_carry_reduction_rate_provenance() {
        let current = current_costs(&sample_inputs());
        let optimized = optimized_costs(&current);
        let savings = savings(&current, &optimized);

        assert_eq!(savings.labor.reduction_rate, 0.60);
        assert_eq!(savings.errors.reduction_rate, 0.80);
        assert_close(savings.total_monthly, 3_740_000.0, 1e-6);
        assert_close(savings.total_annual, 44_880_000.0, 1e-6);
    }

    #[test]
    fn zero_cost_category_saves_nothing() {
        let raw = RawInputs {
            labor_cost: Some(0.0),
            ..crate::test_support::sample_raw_inputs()
        };
        let inputs = OperatingInputs::new(raw).unwrap();
        let current = current_costs(&inputs);
        let savings = savings(&current, &optimized_costs(&current));

        assert_eq!(savings.labor.monthly, 0.0);
        assert_eq!(savings.labor.annual, 0.0);
    }

    proptest! {
        #[test]
        fn current_minus_optimized_equals_savings(
            labor in 0.0f64..1e9,
            shipping in 0.0f64..1e9,
            errors in 0.0f64..1e9,
            inventory in 0.0f64..1e9,
        ) {
            let raw = RawInputs {
                labor_cost: Some(labor),
                shipping_cost: Some(shipping),
                error_cost: Some(errors),
                inventory_cost: Some(inventory),
                ..crate::test_support::sample_raw_inputs()
            };
            let inputs = OperatingInputs::new(raw).unwrap();
            let current = current_costs(&inputs);
            let optimized = optimized_costs(&current);
            let savings = savings(&current, &optimized);

            for category in CostCategory::ALL {
                let before = current.category(category);
                let after = optimized.category(category);
                let saved = savings.category(category);
                let tolerance = 1e-6 * before.annual.max(1.0);
                prop_assert!((before.monthly - after.monthly - saved.monthly).abs() <= tolerance);
                prop_assert!((before.annual - after.annual - saved.annual).abs() <= tolerance);
            }
            let tolerance = 1e-6 * current.total_annual.max(1.0);
            prop_assert!(
                (current.total_annual - optimized.total_annual - savings.total_annual).abs() <= tolerance
            );
            prop_assert!(
                (current.total_monthly - optimized.total_monthly - savings.total_monthly).abs() <= tolerance
            );
        }
    }
}
