// File: crates/star-core/src/source.rs
// Summary: Upstream collaborator seam and the fetch -> plan -> reconstruct orchestration.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::HistoryConfig;
use crate::error::FetchError;
use crate::reconstruct::{reconstruct, FetchedPage};
use crate::schedule::plan_pages;
use crate::types::{SampleMode, StarHistory};

/// Paginated event source for one repository. Transport, auth, and status-code
/// translation live behind this trait.
pub trait StarSource {
    /// Identifier of the subject, e.g. `owner/name`.
    fn repo(&self) -> &str;
    fn fetch_total_count(&mut self) -> Result<u64, FetchError>;
    /// 1-based page of event timestamps, `page_size` items per page.
    fn fetch_page(&mut self, page: u32, page_size: u32) -> Result<Vec<DateTime<Utc>>, FetchError>;
}

/// Run one reconstruction against `source`. The first fetch error aborts the run
/// and is returned unchanged.
pub fn fetch_history<S: StarSource + ?Sized>(
    source: &mut S,
    config: &HistoryConfig,
    today: NaiveDate,
) -> Result<StarHistory, FetchError> {
    let total_count = source.fetch_total_count()?;
    let repo = source.repo().to_string();

    if total_count == 0 {
        tracing::debug!(%repo, "no events upstream");
        return Ok(StarHistory {
            repo,
            total_count,
            mode: SampleMode::Exact,
            series: reconstruct(SampleMode::Exact, &[], 0, config.page_size, config.budget, today),
        });
    }

    let plan = plan_pages(total_count, config.page_size, config.budget);
    tracing::debug!(%repo, total_count, pages = ?plan.pages, mode = ?plan.mode, "fetching planned pages");

    let mut pages = Vec::with_capacity(plan.len());
    for &page in &plan.pages {
        let timestamps = source.fetch_page(page, config.page_size)?;
        pages.push(FetchedPage::new(page, timestamps));
    }

    let series = reconstruct(plan.mode, &pages, total_count, config.page_size, config.budget, today);
    tracing::info!(%repo, total_count, points = series.len(), mode = ?plan.mode, "reconstructed star history");
    Ok(StarHistory { repo, total_count, mode: plan.mode, series })
}
