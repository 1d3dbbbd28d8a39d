// File: crates/star-core/src/error.rs
// Summary: Error types for upstream fetches and series construction.

use chrono::NaiveDate;
use thiserror::Error;

/// Upstream collaborator failures. Surfaced verbatim; the core never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("repository not found")]
    NotFound,
    #[error("upstream rate limit exceeded")]
    RateLimited,
    #[error("invalid or missing credential")]
    Unauthorized,
    #[error("upstream fetch failed: {0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("series must contain at least one record")]
    Empty,
    #[error("series dates must be strictly ascending ({prev} then {next})")]
    NotAscending { prev: NaiveDate, next: NaiveDate },
}
