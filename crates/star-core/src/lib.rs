// File: crates/star-core/src/lib.rs
// Summary: Core library entry point; sampling, reconstruction, growth analysis, and frame rendering.

pub mod config;
pub mod error;
pub mod format;
pub mod frame;
pub mod geometry;
pub mod grid;
pub mod growth;
pub mod mapper;
pub mod reconstruct;
pub mod scale;
pub mod schedule;
pub mod source;
pub mod theme;
pub mod types;

pub use config::HistoryConfig;
pub use error::{FetchError, SeriesError};
pub use frame::{DrawOp, Frame, FrameRenderer, Profile, Reveal, TextAlign};
pub use growth::{analyze, GrowthPoint, DEFAULT_SPIKE_MULTIPLIER};
pub use mapper::{map_record, ChartMode, ChartPoint, SeriesBounds};
pub use reconstruct::{reconstruct, FetchedPage};
pub use scale::PlotScale;
pub use schedule::{plan_pages, PagePlan};
pub use source::{fetch_history, StarSource};
pub use theme::{Rgba, Theme};
pub use types::{CanvasSize, RepoMeta, SampleMode, Series, StarHistory, StarRecord};
