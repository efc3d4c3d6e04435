use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("negative value for field {field}: {value}")]
    NegativeValue { field: &'static str, value: f64 },
    #[error("non-finite value for field {0}")]
    NonFinite(&'static str),
}

/// Monthly operating costs per category, in the caller's currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyCosts {
    pub labor: f64,
    pub shipping: f64,
    pub errors: f64,
    pub inventory: f64,
}

/// Validated operating inputs of one engagement.
///
/// Only [`OperatingInputs::new`] builds this record, so every value seen by
/// the engine is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingInputs {
    annual_revenue: f64,
    monthly_orders: f64,
    avg_order_value: f64,
    monthly_costs: MonthlyCosts,
    investment: f64,
    currency: String,
    industry: Option<String>,
}

/// Unvalidated field values as they arrive from a form, file or CLI.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub annual_revenue: Option<f64>,
    pub monthly_orders: Option<f64>,
    pub avg_order_value: Option<f64>,
    pub labor_cost: Option<f64>,
    pub shipping_cost: Option<f64>,
    pub error_cost: Option<f64>,
    pub inventory_cost: Option<f64>,
    pub investment: Option<f64>,
    pub currency: Option<String>,
    pub industry: Option<String>,
}

pub const DEFAULT_CURRENCY: &str = "USD";

impl OperatingInputs {
    pub fn new(raw: RawInputs) -> Result<Self, InputError> {
        let annual_revenue = required("annual_revenue", raw.annual_revenue)?;
        let monthly_orders = required("monthly_orders", raw.monthly_orders)?;
        let avg_order_value = required("avg_order_value", raw.avg_order_value)?;
        let labor = required("labor_cost", raw.labor_cost)?;
        let shipping = required("shipping_cost", raw.shipping_cost)?;
        let errors = required("error_cost", raw.error_cost)?;
        let inventory = required("inventory_cost", raw.inventory_cost)?;
        let investment = required("investment", raw.investment)?;

        let currency = raw
            .currency
            .map(|value| value.trim().to_uppercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let industry = raw
            .industry
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            annual_revenue,
            monthly_orders,
            avg_order_value,
            monthly_costs: MonthlyCosts {
                labor,
                shipping,
                errors,
                inventory,
            },
            investment,
            currency,
            industry,
        })
    }

    pub fn annual_revenue(&self) -> f64 {
        self.annual_revenue
    }

    pub fn monthly_orders(&self) -> f64 {
        self.monthly_orders
    }

    pub fn monthly_costs(&self) -> MonthlyCosts {
        self.monthly_costs
    }

    pub fn investment(&self) -> f64 {
        self.investment
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }
}

fn required(field: &'static str, value: Option<f64>) -> Result<f64, InputError> {
    let value = value.ok_or(InputError::MissingField(field))?;
    if !value.is_finite() {
        return Err(InputError::NonFinite(field));
    }
    if value < 0.0 {
        return Err(InputError::NegativeValue { field, value });
    }
    // Normalize -0.0 so it cannot produce a distinct cache key.
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_raw_inputs;

    #[test]
    fn new_accepts_complete_inputs() {
        let inputs = OperatingInputs::new(sample_raw_inputs()).unwrap();

        assert_eq!(inputs.annual_revenue(), 500_000_000.0);
        assert_eq!(inputs.monthly_costs().labor, 3_500_000.0);
        assert_eq!(inputs.investment(), 25_000_000.0);
        assert_eq!(inputs.currency(), "USD");
        assert_eq!(inputs.industry(), None);
    }

    #[test]
    fn new_reports_the_missing_field() {
        let mut raw = sample_raw_inputs();
        raw.shipping_cost = None;

        let error = OperatingInputs::new(raw).unwrap_err();
        assert_eq!(error, InputError::MissingField("shipping_cost"));
        assert_eq!(error.to_string(), "missing required field: shipping_cost");
    }

    #[test]
    fn new_rejects_negative_and_non_finite_values() {
        let mut raw = sample_raw_inputs();
        raw.labor_cost = Some(-1.0);
        assert_eq!(
            OperatingInputs::new(raw).unwrap_err(),
            InputError::NegativeValue {
                field: "labor_cost",
                value: -1.0
            }
        );

        let mut raw = sample_raw_inputs();
        raw.investment = Some(f64::NAN);
        assert_eq!(
            OperatingInputs::new(raw).unwrap_err(),
            InputError::NonFinite("investment")
        );

        let mut raw = sample_raw_inputs();
        raw.annual_revenue = Some(f64::INFINITY);
        assert_eq!(
            OperatingInputs::new(raw).unwrap_err(),
            InputError::NonFinite("annual_revenue")
        );
    }

    #[test]
    fn new_allows_zero_investment() {
        let mut raw = sample_raw_inputs();
        raw.investment = Some(0.0);

        let inputs = OperatingInputs::new(raw).unwrap();
        assert_eq!(inputs.investment(), 0.0);
    }

    #[test]
    fn new_normalizes_currency_and_industry() {
        let mut raw = sample_raw_inputs();
        raw.currency = Some(" krw ".to_string());
        raw.industry = Some("   ".to_string());

        let inputs = OperatingInputs::new(raw).unwrap();
        assert_eq!(inputs.currency(), "KRW");
        assert_eq!(inputs.industry(), None);
    }
}
