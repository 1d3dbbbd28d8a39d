// File: crates/star-core/src/growth.rs
// Summary: Per-interval growth rates and spike flagging over a series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{Series, StarRecord};

/// Spike threshold multiplier applied to the mean growth rate.
pub const DEFAULT_SPIKE_MULTIPLIER: f64 = 2.5;
/// Rates at or below this many counts/day are never spikes.
pub const SPIKE_FLOOR: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GrowthPoint {
    /// Date of the later record of the interval.
    pub date: NaiveDate,
    /// Counts per day; never negative.
    pub growth_rate: f64,
    pub count: u64,
    pub is_spike: bool,
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
#[inline]
pub fn days_between(to: NaiveDate, from: NaiveDate) -> i64 {
    (to - from).num_days()
}

fn interval_rate(prev: &StarRecord, curr: &StarRecord) -> f64 {
    let days = days_between(curr.date, prev.date).max(1) as f64;
    let delta = curr.count as f64 - prev.count as f64;
    (delta / days).max(0.0)
}

/// One point per consecutive pair; spikes unflagged.
pub fn growth_rates(series: &Series) -> Vec<GrowthPoint> {
    series
        .records()
        .windows(2)
        .map(|w| GrowthPoint { date: w[1].date, growth_rate: interval_rate(&w[0], &w[1]), count: w[1].count, is_spike: false })
        .collect()
}

/// `mean(rate) * multiplier`; zero for an empty slice.
pub fn spike_threshold(points: &[GrowthPoint], multiplier: f64) -> f64 {
    if points.is_empty() { return 0.0; }
    let mean = points.iter().map(|p| p.growth_rate).sum::<f64>() / points.len() as f64;
    mean * multiplier
}

/// Flag rates strictly above both the threshold and the absolute floor.
pub fn flag_spikes(mut points: Vec<GrowthPoint>, multiplier: f64) -> Vec<GrowthPoint> {
    let threshold = spike_threshold(&points, multiplier);
    for p in &mut points {
        p.is_spike = p.growth_rate > threshold && p.growth_rate > SPIKE_FLOOR;
    }
    points
}

/// Growth rates with spike flags. Recompute whenever the series or multiplier changes.
pub fn analyze(series: &Series, multiplier: f64) -> Vec<GrowthPoint> {
    flag_spikes(growth_rates(series), multiplier)
}

/// Only the flagged points.
pub fn spikes(points: &[GrowthPoint]) -> impl Iterator<Item = &GrowthPoint> {
    points.iter().filter(|p| p.is_spike)
}

/// The growth view as a plottable series of (date, rounded rate); `None` for a single-record series.
pub fn growth_series(points: &[GrowthPoint]) -> Option<Series> {
    let records = points
        .iter()
        .map(|p| StarRecord::new(p.date, p.growth_rate.round() as u64))
        .collect::<Vec<_>>();
    Series::new(records).ok()
}
