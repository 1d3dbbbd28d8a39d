// File: crates/star-core/src/types.rs
// Summary: Shared types and constants (records, series, page sizes, canvas sizes).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// Items per upstream page.
pub const PAGE_SIZE: u32 = 100;
/// Default cap on upstream page requests per reconstruction.
pub const DEFAULT_BUDGET: u32 = 30;

/// Video canvas width in pixels.
pub const VIDEO_WIDTH: i32 = 1920;
/// Video canvas height in pixels.
pub const VIDEO_HEIGHT: i32 = 1080;
/// GIF canvas width in pixels.
pub const GIF_WIDTH: i32 = 800;
/// GIF canvas height in pixels.
pub const GIF_HEIGHT: i32 = 600;

/// One (calendar day, cumulative count) observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StarRecord {
    pub date: NaiveDate,
    pub count: u64,
}

impl StarRecord {
    pub const fn new(date: NaiveDate, count: u64) -> Self {
        Self { date, count }
    }
}

/// Ordered, reconstructed sequence of records.
/// Contract: non-empty, dates strictly ascending. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Series {
    records: Vec<StarRecord>,
}

impl Series {
    /// Validate and wrap `records`.
    pub fn new(records: Vec<StarRecord>) -> Result<Self, SeriesError> {
        if records.is_empty() {
            return Err(SeriesError::Empty);
        }
        if let Some(w) = records.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(SeriesError::NotAscending { prev: w[0].date, next: w[1].date });
        }
        Ok(Self { records })
    }

    /// Build from a date-keyed map; ordering and uniqueness come from the map.
    /// Callers guarantee the map is non-empty.
    pub(crate) fn from_map(map: BTreeMap<NaiveDate, u64>) -> Self {
        debug_assert!(!map.is_empty());
        Self { records: map.into_iter().map(|(date, count)| StarRecord { date, count }).collect() }
    }

    pub fn records(&self) -> &[StarRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    /// Never true for a constructed series.
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn first(&self) -> &StarRecord { &self.records[0] }
    pub fn last(&self) -> &StarRecord { &self.records[self.records.len() - 1] }
    pub fn get(&self, index: usize) -> Option<&StarRecord> { self.records.get(index) }
    pub fn iter(&self) -> std::slice::Iter<'_, StarRecord> { self.records.iter() }

    pub fn max_count(&self) -> u64 {
        self.records.iter().map(|r| r.count).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a StarRecord;
    type IntoIter = std::slice::Iter<'a, StarRecord>;
    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

/// Whether the series counts every event or extrapolates from page offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleMode {
    Exact,
    /// Counts assume uniform density per page; they are approximations.
    Estimated,
}

/// Static descriptive metadata about the subject repository.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMeta {
    /// `owner/name` identifier.
    pub repo: String,
    pub description: String,
    pub language: String,
    pub created_at: Option<NaiveDate>,
}

impl RepoMeta {
    pub fn new(repo: impl Into<String>) -> Self {
        Self { repo: repo.into(), ..Self::default() }
    }
}

/// Outcome of one reconstruction run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StarHistory {
    pub repo: String,
    pub total_count: u64,
    pub mode: SampleMode,
    pub series: Series,
}

impl StarHistory {
    pub fn is_estimated(&self) -> bool { self.mode == SampleMode::Estimated }
}

/// Surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
}

impl CanvasSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
    pub const fn video() -> Self { Self::new(VIDEO_WIDTH, VIDEO_HEIGHT) }
    pub const fn gif() -> Self { Self::new(GIF_WIDTH, GIF_HEIGHT) }
}

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Plot margins for a canvas, proportional to the 1920x1080 reference layout
    /// (200px sides, 280px above the plot, 500px tall plot).
    pub fn for_canvas(size: CanvasSize) -> Self {
        let w = size.width as f32;
        let h = size.height as f32;
        let side = w * (200.0 / 1920.0);
        let top = h * (280.0 / 1080.0);
        let bottom = h - top - h * (500.0 / 1080.0);
        Self::new(side, side, top, bottom)
    }
}
