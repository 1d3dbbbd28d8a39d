// File: crates/star-core/src/mapper.rs
// Summary: Record -> chart-space coordinates. Shared by the interactive chart and exported frames.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::growth::days_between;
use crate::types::{Series, StarRecord};

/// Horizontal axis interpretation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Absolute calendar axis; `x` is days since 1970-01-01.
    #[default]
    Date,
    /// Elapsed days since the first record.
    Timeline,
}

/// Extents a mapping is evaluated against. Computed once per series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesBounds {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub max_count: u64,
}

impl SeriesBounds {
    pub fn of(series: &Series) -> Self {
        Self { first: series.first().date, last: series.last().date, max_count: series.max_count() }
    }

    /// Elapsed days between the first and last record.
    pub fn span_days(&self) -> i64 {
        days_between(self.last, self.first).max(0)
    }
}

/// Chart-space coordinate. `y` is in `[0, 1]` with 0 at the top (highest count).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn axis_x(date: NaiveDate, mode: ChartMode, bounds: &SeriesBounds) -> f64 {
    match mode {
        ChartMode::Date => days_between(date, epoch()) as f64,
        ChartMode::Timeline if bounds.span_days() == 0 => 0.0,
        ChartMode::Timeline => days_between(date, bounds.first) as f64,
    }
}

/// Map one record. Pure in `(record, mode, bounds)`.
pub fn map_record(record: &StarRecord, mode: ChartMode, bounds: &SeriesBounds) -> ChartPoint {
    let y = if bounds.max_count == 0 {
        1.0
    } else {
        1.0 - record.count as f64 / bounds.max_count as f64
    };
    ChartPoint { x: axis_x(record.date, mode, bounds), y }
}

/// `(min, max)` of `x` over the bounds.
pub fn x_range(mode: ChartMode, bounds: &SeriesBounds) -> (f64, f64) {
    (axis_x(bounds.first, mode, bounds), axis_x(bounds.last, mode, bounds))
}

/// `x` rescaled to `[0, 1]` over the bounds; a zero span maps to 0.
pub fn normalized_x(x: f64, mode: ChartMode, bounds: &SeriesBounds) -> f64 {
    let (lo, hi) = x_range(mode, bounds);
    let span = hi - lo;
    if span <= 0.0 { 0.0 } else { ((x - lo) / span).clamp(0.0, 1.0) }
}

/// Map every record of `series` against its own bounds.
pub fn map_series(series: &Series, mode: ChartMode) -> Vec<ChartPoint> {
    let bounds = SeriesBounds::of(series);
    series.iter().map(|r| map_record(r, mode, &bounds)).collect()
}
