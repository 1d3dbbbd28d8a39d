// File: crates/star-core/src/reconstruct.rs
// Summary: Merges fetched page payloads into an ordered, deduplicated series (exact or estimated).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{SampleMode, Series, StarRecord};

/// One upstream page as returned by the collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedPage {
    /// 1-based page index.
    pub page: u32,
    /// Event timestamps in the order the upstream returned them.
    pub timestamps: Vec<DateTime<Utc>>,
}

impl FetchedPage {
    pub fn new(page: u32, timestamps: Vec<DateTime<Utc>>) -> Self {
        Self { page, timestamps }
    }
}

/// Date-keyed accumulator. Same-day collisions keep the larger count.
#[derive(Debug, Default)]
struct DayMap {
    days: BTreeMap<NaiveDate, u64>,
}

impl DayMap {
    fn put(&mut self, record: StarRecord) {
        let slot = self.days.entry(record.date).or_insert(record.count);
        if record.count > *slot {
            *slot = record.count;
        }
    }

    fn finish(mut self, today: NaiveDate, total_count: u64) -> Series {
        let before = self.days.len();
        self.days.retain(|d, _| *d <= today);
        let dropped = before - self.days.len();
        if dropped > 0 {
            tracing::warn!(dropped, %today, "discarding samples dated after today");
        }
        // Today always reports the true total, overriding any sample.
        self.days.insert(today, total_count);
        Series::from_map(self.days)
    }
}

/// Evenly spaced indices `floor(i / (s - 1) * (n - 1))` for `i in 0..s`, `s = min(budget, n)`.
pub fn sample_indices(n: usize, budget: usize) -> Vec<usize> {
    let s = budget.min(n);
    match s {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let span = (n - 1) as f64;
            let steps = (s - 1) as f64;
            (0..s).map(|i| ((i as f64 / steps) * span).floor() as usize).collect()
        }
    }
}

/// Exact mode: every event is present; pick evenly spaced ranks from the sorted timeline.
/// A zero budget is treated as one, as in page planning.
pub fn reconstruct_exact(
    pages: &[FetchedPage],
    total_count: u64,
    budget: u32,
    today: NaiveDate,
) -> Series {
    let mut stamps: Vec<DateTime<Utc>> = pages.iter().flat_map(|p| p.timestamps.iter().copied()).collect();
    stamps.sort_unstable();

    let mut map = DayMap::default();
    for idx in sample_indices(stamps.len(), budget.max(1) as usize) {
        map.put(StarRecord::new(stamps[idx].date_naive(), idx as u64 + 1));
    }
    tracing::debug!(events = stamps.len(), samples = map.days.len(), "reconstructed exact series");
    map.finish(today, total_count)
}

/// Estimated mode: each page's first event is assumed to sit at offset `page_size * (page - 1)`.
/// Counts are approximations under a uniform-density assumption.
pub fn reconstruct_estimated(
    pages: &[FetchedPage],
    total_count: u64,
    page_size: u32,
    today: NaiveDate,
) -> Series {
    let mut map = DayMap::default();
    for page in pages {
        let Some(first) = page.timestamps.first() else { continue };
        let offset = u64::from(page_size) * u64::from(page.page.saturating_sub(1));
        map.put(StarRecord::new(first.date_naive(), offset));
    }
    tracing::debug!(pages = pages.len(), samples = map.days.len(), "reconstructed estimated series");
    map.finish(today, total_count)
}

/// Dispatch on `mode`. A zero total short-circuits to `[{today, 0}]`.
pub fn reconstruct(
    mode: SampleMode,
    pages: &[FetchedPage],
    total_count: u64,
    page_size: u32,
    budget: u32,
    today: NaiveDate,
) -> Series {
    if total_count == 0 {
        return DayMap::default().finish(today, 0);
    }
    match mode {
        SampleMode::Exact => reconstruct_exact(pages, total_count, budget, today),
        SampleMode::Estimated => reconstruct_estimated(pages, total_count, page_size, today),
    }
}
