/// Transactions per second, two decimals.
#[must_use]
pub fn format_tps(v: f64) -> String {
    format!("{:.2}", finite_or_zero(v))
}

/// Milliseconds, two decimals.
#[must_use]
pub fn format_ms(v: f64) -> String {
    format!("{:.2} ms", finite_or_zero(v))
}

/// Percentages, one decimal.
#[must_use]
pub fn format_pct(v: f64) -> String {
    format!("{:.1}%", finite_or_zero(v))
}

pub(crate) fn format_signed_pct(v: f64) -> String {
    format!("{:+.1}%", finite_or_zero(v))
}

pub(crate) fn format_points(v: f64) -> String {
    format!("{:+.1} percentage points", finite_or_zero(v))
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
