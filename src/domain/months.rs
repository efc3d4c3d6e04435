use serde::Serializer;

/// Serializes a month count, writing the "never pays back" sentinel
/// (`+inf`) as the string `"inf"`. JSON has no infinity and would otherwise
/// emit `null`.
pub fn serialize_months<S: Serializer>(months: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if months.is_finite() {
        serializer.serialize_f64(*months)
    } else if months.is_nan() {
        serializer.serialize_str("nan")
    } else if *months > 0.0 {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}
