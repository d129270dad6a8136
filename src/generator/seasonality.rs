//! Deterministic seasonal and trend multipliers applied to incurred losses

use std::f64::consts::PI;

/// Monthly seasonal multiplier: `1 + amplitude * sin(2π * month / 12)`
///
/// `month` is the calendar month (1-12). Peaks in March, troughs in September.
pub fn seasonal_factor(month: u32, amplitude: f64) -> f64 {
    1.0 + (month as f64 * 2.0 * PI / 12.0).sin() * amplitude
}

/// Linear loss trend: `1 + days_elapsed / 1000 * rate`
pub fn trend_factor(days_elapsed: i64, rate_per_1000_days: f64) -> f64 {
    1.0 + days_elapsed as f64 / 1000.0 * rate_per_1000_days
}
