// File: crates/star-export/src/video.rs
// Summary: StreamingVideoExport; one render per tick, frames pushed into a continuous capture sink.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use star_core::{CanvasSize, ChartMode, FrameRenderer, Profile, Series};
use star_render_skia::SkiaRenderer;

use crate::context::ExportContext;
use crate::error::ExportError;
use crate::sink::CaptureSink;
use crate::{ExportJob, ExportKind};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub duration_secs: u32,
    pub fps: u32,
    pub width: i32,
    pub height: i32,
    /// Pause after the last frame before finalizing, letting the encoder flush.
    pub settle_ms: u64,
    pub ffmpeg_bin: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        let size = Profile::Video.canvas();
        Self { duration_secs: 8, fps: 30, width: size.width, height: size.height, settle_ms: 500, ffmpeg_bin: "ffmpeg".into() }
    }
}

impl VideoConfig {
    /// `duration * fps`, independent of series length.
    pub fn total_frames(&self) -> u32 {
        self.duration_secs.saturating_mul(self.fps).max(1)
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoState {
    Idle,
    Recording,
    Finalizing,
    Done,
    Error,
}

/// Outcome of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// More frames remain; yield and tick again.
    Continue,
    /// Progress reached 1; call `finalize`.
    Complete,
}

pub struct StreamingVideoExport {
    series: Arc<Series>,
    renderer: FrameRenderer,
    mode: ChartMode,
    config: VideoConfig,
    sink: Box<dyn CaptureSink>,
    surface: Option<SkiaRenderer>,
    state: VideoState,
    frame_index: u32,
}

impl StreamingVideoExport {
    pub fn new(series: Arc<Series>, renderer: FrameRenderer, mode: ChartMode, config: VideoConfig, sink: Box<dyn CaptureSink>) -> Self {
        Self { series, renderer, mode, config, sink, surface: None, state: VideoState::Idle, frame_index: 0 }
    }

    pub fn state(&self) -> VideoState { self.state }
    pub fn frame_index(&self) -> u32 { self.frame_index }
    pub fn total_frames(&self) -> u32 { self.config.total_frames() }

    /// Idle -> Recording: take the surface and open the sink.
    pub fn start(&mut self) -> Result<(), ExportError> {
        if self.state != VideoState::Idle {
            return Err(ExportError::EncodingFailure(format!("cannot start from {:?}", self.state)));
        }
        let surface = match SkiaRenderer::new(self.config.canvas()) {
            Ok(s) => s,
            Err(e) => return Err(self.fail(e.into())),
        };
        self.surface = Some(surface);
        if let Err(e) = self.sink.begin(self.config.canvas(), self.config.fps) {
            return Err(self.fail(e));
        }
        self.state = VideoState::Recording;
        tracing::debug!(frames = self.total_frames(), "video recording started");
        Ok(())
    }

    /// Render and capture exactly one frame.
    pub fn tick(&mut self, ctx: &mut ExportContext) -> Result<Tick, ExportError> {
        if self.state != VideoState::Recording {
            return Err(ExportError::EncodingFailure(format!("cannot tick from {:?}", self.state)));
        }
        if ctx.is_cancelled() {
            return Err(self.fail(ExportError::Cancelled));
        }

        self.frame_index += 1;
        let total = self.total_frames();
        let progress = (f64::from(self.frame_index) / f64::from(total)).min(1.0);
        let frame = self.renderer.render(&self.series, progress, self.mode, self.config.canvas(), Profile::Video);

        let Some(surface) = self.surface.as_mut() else {
            return Err(self.fail(ExportError::SurfaceUnavailable("surface released".into())));
        };
        let pushed = surface
            .render_rgba8(&frame)
            .map_err(ExportError::from)
            .and_then(|rgba| self.sink.push_frame(&rgba));
        if let Err(e) = pushed {
            return Err(self.fail(e));
        }
        ctx.report((progress * 100.0).floor() as u32);

        if self.frame_index >= total {
            self.state = VideoState::Finalizing;
            Ok(Tick::Complete)
        } else {
            Ok(Tick::Continue)
        }
    }

    /// Finalizing -> Done: settle, then collect the contiguous object.
    pub fn finalize(&mut self, ctx: &mut ExportContext) -> Result<Vec<u8>, ExportError> {
        if self.state != VideoState::Finalizing {
            return Err(ExportError::EncodingFailure(format!("cannot finalize from {:?}", self.state)));
        }
        if self.config.settle_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.settle_ms));
        }
        if ctx.is_cancelled() {
            return Err(self.fail(ExportError::Cancelled));
        }
        let bytes = match self.sink.finish() {
            Ok(b) => b,
            Err(e) => return Err(self.fail(e)),
        };
        self.surface = None;
        self.state = VideoState::Done;
        tracing::info!(frames = self.frame_index, bytes = bytes.len(), "video export finished");
        Ok(bytes)
    }

    /// Abort from any state; nothing partial survives.
    pub fn cancel(&mut self) {
        if !matches!(self.state, VideoState::Done | VideoState::Error) {
            self.fail(ExportError::Cancelled);
        }
    }

    fn fail(&mut self, err: ExportError) -> ExportError {
        tracing::warn!(error = %err, frame = self.frame_index, "video export aborted");
        self.sink.abort();
        self.surface = None;
        self.state = VideoState::Error;
        err
    }
}

impl ExportJob for StreamingVideoExport {
    fn kind(&self) -> ExportKind { ExportKind::Video }

    fn run(mut self, ctx: &mut ExportContext) -> Result<Vec<u8>, ExportError> {
        self.start()?;
        while self.tick(ctx)? == Tick::Continue {}
        self.finalize(ctx)
    }
}
