/// Percentile helpers for slices sorted in ascending order.
///
/// - Empty input => `None` (or `0.0` for the f64 wrapper).
/// - `percentile <= 0` => first element.
/// - `percentile >= 100` => last element.
/// - Otherwise the position within `[0, len-1]` is rounded to the nearest
///   index (nearest rank, no interpolation).
pub fn value_sorted<T: Copy>(sorted_values: &[T], percentile: f64) -> Option<T> {
    if sorted_values.is_empty() {
        return None;
    }

    let index = if percentile <= 0.0 {
        0
    } else if percentile >= 100.0 {
        sorted_values.len() - 1
    } else {
        let position = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
        position.round() as usize
    };

    sorted_values.get(index).copied()
}

pub fn value_f64_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    value_sorted(sorted_values, percentile).unwrap_or(0.0)
}

/// Median of a sorted slice; averages the two middle values for even lengths.
pub fn median_sorted(sorted_values: &[f64]) -> f64 {
    let len = sorted_values.len();
    match len {
        0 => 0.0,
        _ if len % 2 == 1 => sorted_values[len / 2],
        _ => (sorted_values[len / 2 - 1] + sorted_values[len / 2]) / 2.0,
    }
}

/// Two-sided empirical interval holding `level` of the mass, e.g. the
/// 2.5th and 97.5th percentiles for `level = 0.95`.
pub fn interval_sorted(sorted_values: &[f64], level: f64) -> (f64, f64) {
    let tail = (1.0 - level.clamp(0.0, 1.0)) / 2.0 * 100.0;
    (
        value_f64_sorted(sorted_values, tail),
        value_f64_sorted(sorted_values, 100.0 - tail),
    )
}
