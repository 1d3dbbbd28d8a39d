// File: crates/star-export/src/lib.rs
// Summary: Export jobs that replay a series through the frame renderer into media artifacts.

pub mod context;
pub mod error;
pub mod gif;
pub mod sink;
pub mod task;
pub mod video;

pub use context::{CancellationToken, ExportContext, Percent};
pub use error::ExportError;
pub use gif::{BatchGifExport, GifConfig, GifState};
pub use sink::{CaptureSink, FfmpegSink, MemorySink};
pub use task::ExportTask;
pub use video::{StreamingVideoExport, Tick, VideoConfig, VideoState};

/// A job that turns a read-only series into one binary media object.
/// Either the whole artifact is returned or an error; never a partial buffer.
pub trait ExportJob {
    fn kind(&self) -> ExportKind;
    fn run(self, ctx: &mut ExportContext) -> Result<Vec<u8>, ExportError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    Video,
    Gif,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Video => "webm",
            ExportKind::Gif => "gif",
        }
    }
}

/// Download name derived from the subject: `owner/name` -> `owner-name-star-history.webm`.
pub fn artifact_file_name(repo: &str, kind: ExportKind) -> String {
    let stem: String = repo
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '-' } else { c })
        .collect();
    let stem = if stem.is_empty() { "repo".to_string() } else { stem };
    format!("{stem}-star-history.{}", kind.extension())
}
