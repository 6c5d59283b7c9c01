//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a u64 count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert a usize count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Share of `part` in `whole`, returning 0.0 when `whole` is zero.
#[must_use]
pub fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    u64_to_f64(part) / u64_to_f64(whole)
}

/// Scale a percentage onto a fixed ticket total, rounding to the nearest ticket.
///
/// Returns `None` for non-finite input. Results are clamped to the i64 range so
/// negative percentages survive as negative ticket counts for validation.
#[must_use]
pub fn percent_to_tickets(percent: f64, total_tickets: u64) -> Option<i64> {
    if !percent.is_finite() {
        return None;
    }
    let scaled = (percent / 100.0 * u64_to_f64(total_tickets)).round();
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    cast::<f64, i64>(scaled.clamp(min, max))
}
