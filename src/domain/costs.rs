use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Labor,
    Shipping,
    Errors,
    Inventory,
}

impl CostCategory {
    pub const ALL: [CostCategory; 4] = [
        CostCategory::Labor,
        CostCategory::Shipping,
        CostCategory::Errors,
        CostCategory::Inventory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CostCategory::Labor => "Labor",
            CostCategory::Shipping => "Shipping & logistics",
            CostCategory::Errors => "Errors & rework",
            CostCategory::Inventory => "Inventory carrying",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryCost {
    pub monthly: f64,
    pub annual: f64,
}

impl CategoryCost {
    pub fn from_monthly(monthly: f64) -> Self {
        Self {
            monthly,
            annual: monthly * 12.0,
        }
    }
}

/// Per-category monthly/annual costs plus the aggregate.
///
/// `total_monthly` is `total_annual / 12`, not a sum of the category
/// monthlies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub labor: CategoryCost,
    pub shipping: CategoryCost,
    pub errors: CategoryCost,
    pub inventory: CategoryCost,
    pub total_monthly: f64,
    pub total_annual: f64,
}

impl CostBreakdown {
    pub fn from_categories(
        labor: CategoryCost,
        shipping: CategoryCost,
        errors: CategoryCost,
        inventory: CategoryCost,
    ) -> Self {
        let total_annual = labor.annual + shipping.annual + errors.annual + inventory.annual;
        Self {
            labor,
            shipping,
            errors,
            inventory,
            total_monthly: total_annual / 12.0,
            total_annual,
        }
    }

    pub fn category(&self, category: CostCategory) -> CategoryCost {
        match category {
            CostCategory::Labor => self.labor,
            CostCategory::Shipping => self.shipping,
            CostCategory::Errors => self.errors,
            CostCategory::Inventory => self.inventory,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySavings {
    pub monthly: f64,
    pub annual: f64,
    /// Reduction rate this saving was derived from.
    pub reduction_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsBreakdown {
    pub labor: CategorySavings,
    pub shipping: CategorySavings,
    pub errors: CategorySavings,
    pub inventory: CategorySavings,
    pub total_monthly: f64,
    pub total_annual: f64,
}

impl SavingsBreakdown {
    pub fn category(&self, category: CostCategory) -> CategorySavings {
        match category {
            CostCategory::Labor => self.labor,
            CostCategory::Shipping => self.shipping,
            CostCategory::Errors => self.errors,
            CostCategory::Inventory => self.inventory,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CostCategory, CategorySavings)> + '_ {
        CostCategory::ALL
            .into_iter()
            .map(move |category| (category, self.category(category)))
    }
}
