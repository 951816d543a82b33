//! Percentage and rounding helpers shared by the queries

/// `part / whole * 100`, truncated toward zero. An empty whole yields 0.
///
/// Computed in f64 in the same order as the division-then-scale of the
/// source tables' tooling, so e.g. 1/3 gives 33 and 2/3 gives 66.
pub fn truncated_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0) as u32
}

/// Round to `decimals` places, ties to even on the scaled value
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
