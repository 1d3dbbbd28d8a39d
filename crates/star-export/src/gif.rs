// File: crates/star-export/src/gif.rs
// Summary: BatchGifExport; generate every frame, then quantize + compress on a background worker.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, RgbaImage};
use serde::Deserialize;
use star_core::{CanvasSize, ChartMode, FrameRenderer, Profile, Series};
use star_render_skia::SkiaRenderer;

use crate::context::{CancellationToken, ExportContext};
use crate::error::ExportError;
use crate::{ExportJob, ExportKind};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GifConfig {
    pub duration_secs: u32,
    pub fps: u32,
    pub width: i32,
    pub height: i32,
    /// NeuQuant sampling speed, 1 (best) ..= 30 (fastest).
    pub speed: i32,
}

impl Default for GifConfig {
    fn default() -> Self {
        let size = Profile::Gif.canvas();
        Self { duration_secs: 6, fps: 20, width: size.width, height: size.height, speed: 10 }
    }
}

impl GifConfig {
    pub fn total_frames(&self) -> u32 {
        self.duration_secs.saturating_mul(self.fps).max(1)
    }

    /// Fixed inter-frame delay.
    pub fn delay_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GifState {
    Idle,
    Generating,
    Encoding,
    Done,
    Error,
}

// ---- worker protocol ----------------------------------------------------------

enum Submit {
    Frame(RgbaImage),
    Finish,
}

#[derive(Debug)]
enum Event {
    Progress { done: u32, total: u32 },
    Done(Vec<u8>),
    Failed(String),
    /// The worker saw the shared token and stopped between frames.
    Cancelled,
}

/// Background encoder reached only through channels.
struct EncoderWorker {
    tx: Option<Sender<Submit>>,
    rx: Receiver<Event>,
    handle: Option<JoinHandle<()>>,
}

impl EncoderWorker {
    fn spawn(delay_ms: u32, speed: i32, cancel: CancellationToken) -> Self {
        let (tx, work_rx) = unbounded::<Submit>();
        let (event_tx, rx) = unbounded::<Event>();
        let handle = thread::spawn(move || encode_loop(work_rx, event_tx, delay_ms, speed, cancel));
        Self { tx: Some(tx), rx, handle: Some(handle) }
    }

    fn submit(&self, frame: RgbaImage) -> Result<(), ExportError> {
        self.tx
            .as_ref()
            .and_then(|tx| tx.send(Submit::Frame(frame)).ok())
            .ok_or_else(|| ExportError::EncodingFailure("encoder worker stopped".into()))
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        let tx = self.tx.take().ok_or_else(|| ExportError::EncodingFailure("encoder worker stopped".into()))?;
        tx.send(Submit::Finish).map_err(|_| ExportError::EncodingFailure("encoder worker stopped".into()))
    }

    /// Drop our channel ends and wait for the thread. Buffered frames are discarded.
    fn shutdown(&mut self) {
        self.tx.take();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

impl Drop for EncoderWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn encode_loop(rx: Receiver<Submit>, events: Sender<Event>, delay_ms: u32, speed: i32, cancel: CancellationToken) {
    let mut frames = Vec::new();
    loop {
        match rx.recv() {
            Ok(Submit::Frame(f)) => frames.push(f),
            Ok(Submit::Finish) => break,
            // Producer went away: cancelled or failed upstream.
            Err(_) => return,
        }
    }

    let total = frames.len() as u32;
    let mut out = Vec::new();
    let result = (|| -> Result<(), Option<String>> {
        let mut encoder = GifEncoder::new_with_speed(&mut out, speed.clamp(1, 30));
        encoder.set_repeat(Repeat::Infinite).map_err(|e| Some(e.to_string()))?;
        for (i, img) in frames.into_iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(None);
            }
            let frame = image::Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));
            encoder.encode_frame(frame).map_err(|e| Some(e.to_string()))?;
            if events.send(Event::Progress { done: i as u32 + 1, total }).is_err() {
                return Err(Some("caller went away".into()));
            }
        }
        Ok(())
    })();

    let event = match result {
        Ok(()) => Event::Done(out),
        Err(Some(e)) => Event::Failed(e),
        Err(None) => Event::Cancelled,
    };
    let _ = events.send(event);
}

// ---- job ----------------------------------------------------------------------

pub struct BatchGifExport {
    series: Arc<Series>,
    renderer: FrameRenderer,
    mode: ChartMode,
    config: GifConfig,
    state: GifState,
}

impl BatchGifExport {
    pub fn new(series: Arc<Series>, renderer: FrameRenderer, mode: ChartMode, config: GifConfig) -> Self {
        Self { series, renderer, mode, config, state: GifState::Idle }
    }

    pub fn state(&self) -> GifState { self.state }

    /// Progress fraction of generated frame `i` (0-based): first frame 0, last frame 1.
    pub fn frame_progress(&self, i: u32) -> f64 {
        let total = self.config.total_frames();
        if total <= 1 { 1.0 } else { f64::from(i) / f64::from(total - 1) }
    }

    fn fail(&mut self, err: ExportError) -> ExportError {
        tracing::warn!(error = %err, state = ?self.state, "gif export aborted");
        self.state = GifState::Error;
        err
    }

    fn generate(&mut self, ctx: &mut ExportContext, worker: &EncoderWorker) -> Result<(), ExportError> {
        let canvas = self.config.canvas();
        let mut surface = SkiaRenderer::new(canvas)?;
        let total = self.config.total_frames();
        self.state = GifState::Generating;

        for i in 0..total {
            if ctx.is_cancelled() {
                return Err(ExportError::Cancelled);
            }
            let frame = self.renderer.render(&self.series, self.frame_progress(i), self.mode, canvas, Profile::Gif);
            let rgba = surface.render_rgba8(&frame)?;
            let img = RgbaImage::from_raw(canvas.width as u32, canvas.height as u32, rgba)
                .ok_or_else(|| ExportError::EncodingFailure("frame buffer size mismatch".into()))?;
            worker.submit(img)?;
            ctx.report((i + 1) * 50 / total);
        }
        Ok(())
    }

    fn encode(&mut self, ctx: &mut ExportContext, worker: &mut EncoderWorker) -> Result<Vec<u8>, ExportError> {
        self.state = GifState::Encoding;
        worker.finish()?;
        loop {
            if ctx.is_cancelled() {
                return Err(ExportError::Cancelled);
            }
            match worker.rx.recv() {
                Ok(Event::Progress { done, total }) => ctx.report(50 + done * 50 / total.max(1)),
                Ok(Event::Done(bytes)) => return Ok(bytes),
                Ok(Event::Cancelled) => return Err(ExportError::Cancelled),
                Ok(Event::Failed(_)) if ctx.is_cancelled() => return Err(ExportError::Cancelled),
                Ok(Event::Failed(msg)) => return Err(ExportError::EncodingFailure(msg)),
                Err(_) => return Err(ExportError::EncodingFailure("encoder worker exited".into())),
            }
        }
    }
}

impl ExportJob for BatchGifExport {
    fn kind(&self) -> ExportKind { ExportKind::Gif }

    fn run(mut self, ctx: &mut ExportContext) -> Result<Vec<u8>, ExportError> {
        if self.state != GifState::Idle {
            return Err(ExportError::EncodingFailure(format!("cannot start from {:?}", self.state)));
        }
        let mut worker = EncoderWorker::spawn(self.config.delay_ms(), self.config.speed, ctx.token());

        let result = self.generate(ctx, &worker).and_then(|()| self.encode(ctx, &mut worker));
        match result {
            Ok(bytes) => {
                worker.shutdown();
                self.state = GifState::Done;
                ctx.report(100);
                tracing::info!(frames = self.config.total_frames(), bytes = bytes.len(), "gif export finished");
                Ok(bytes)
            }
            Err(e) => {
                // The worker shares the cancellation token and stops between frames.
                worker.shutdown();
                Err(self.fail(e))
            }
        }
    }
}
