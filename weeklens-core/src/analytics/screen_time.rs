//! Screen-time bar heights.
//!
//! Bars are scaled against the largest daily total so the tallest bar fills
//! the chart. An all-zero series renders flat instead of dividing by zero.

use serde::Serialize;

use crate::types::ScreenTimeDay;

/// Largest daily total, `0.0` for an empty series.
pub fn max_total(days: &[ScreenTimeDay]) -> f64 {
    days.iter()
        .map(|d| d.total)
        .filter(|t| t.is_finite())
        .fold(0.0, f64::max)
}

/// Height fraction of `value` relative to the largest daily total.
pub fn normalized_height(value: f64, days: &[ScreenTimeDay]) -> f64 {
    fraction(value, max_total(days))
}

fn fraction(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    value / max
}

/// One day of the screen-time chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenTimeBar {
    pub label: String,
    pub total: f64,
    pub unproductive: f64,
    /// Total bar height in 0..=1
    pub total_fraction: f64,
    /// Unproductive bar height in 0..=1, same scale as the total
    pub unproductive_fraction: f64,
}

/// Bars for every day, all normalized against one maximum.
pub fn screen_time_bars(days: &[ScreenTimeDay]) -> Vec<ScreenTimeBar> {
    let max = max_total(days);
    days.iter()
        .map(|d| ScreenTimeBar {
            label: d.day.clone(),
            total: d.total,
            unproductive: d.unproductive,
            total_fraction: fraction(d.total, max),
            unproductive_fraction: fraction(d.unproductive, max),
        })
        .collect()
}
