// File: crates/demo/src/source.rs
// Summary: CSV-backed star source; pages over a local export of starred-at timestamps.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use star_core::{FetchError, StarSource};

/// All events loaded up front, served back in upstream page order (oldest first).
pub struct CsvStarSource {
    repo: String,
    events: Vec<DateTime<Utc>>,
}

impl CsvStarSource {
    pub fn from_path(repo: impl Into<String>, path: &Path) -> Result<Self> {
        let rdr = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Self::from_reader(repo, rdr).with_context(|| format!("reading {}", path.display()))
    }

    pub fn from_reader<R: Read>(repo: impl Into<String>, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

        let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
        tracing::debug!(?headers, "csv headers");
        let column = ["starred_at", "timestamp", "date", "time", "created_at"]
            .iter()
            .find_map(|want| headers.iter().position(|h| h == want))
            .unwrap_or(0);

        let mut events = Vec::new();
        let mut skipped = 0usize;
        for rec in rdr.records() {
            let rec = rec?;
            match rec.get(column).and_then(parse_time) {
                Some(t) => events.push(t),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "ignored rows without a readable timestamp");
        }
        events.sort_unstable();
        Ok(Self { repo: repo.into(), events })
    }

    pub fn len(&self) -> usize { self.events.len() }
}

impl StarSource for CsvStarSource {
    fn repo(&self) -> &str { &self.repo }

    fn fetch_total_count(&mut self) -> Result<u64, FetchError> {
        Ok(self.events.len() as u64)
    }

    fn fetch_page(&mut self, page: u32, page_size: u32) -> Result<Vec<DateTime<Utc>>, FetchError> {
        if page == 0 {
            return Err(FetchError::Other("pages are 1-based".into()));
        }
        let lo = (page as usize - 1).saturating_mul(page_size as usize);
        let hi = lo.saturating_add(page_size as usize).min(self.events.len());
        Ok(self.events.get(lo..hi).map(<[_]>::to_vec).unwrap_or_default())
    }
}

/// RFC 3339, `YYYY-MM-DD`, or epoch seconds/milliseconds.
fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|t| t.and_utc());
    }
    let n = s.parse::<i64>().ok()?;
    if n > 10_i64.pow(12) {
        DateTime::from_timestamp_millis(n)
    } else {
        DateTime::from_timestamp(n, 0)
    }
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
pub fn resolve_path(raw: &Path) -> Result<(PathBuf, bool)> {
    if raw.exists() {
        return Ok((raw.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(raw) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", raw.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}
