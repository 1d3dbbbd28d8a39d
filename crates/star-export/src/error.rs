// File: crates/star-export/src/error.rs
// Summary: Terminal export failures; each aborts only its own job.

use star_render_skia::RasterError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("encoding failed: {0}")]
    EncodingFailure(String),
    #[error("export cancelled")]
    Cancelled,
}

impl From<RasterError> for ExportError {
    fn from(e: RasterError) -> Self {
        match e {
            RasterError::SurfaceUnavailable { .. } => ExportError::SurfaceUnavailable(e.to_string()),
            other => ExportError::EncodingFailure(other.to_string()),
        }
    }
}
