// File: crates/star-export/src/sink.rs
// Summary: Continuous capture sinks for the streaming video export (ffmpeg WebM/VP9, in-memory).

use std::io::{Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};

use star_core::CanvasSize;

use crate::error::ExportError;

/// Receives raw RGBA8 frames in order and produces one contiguous media object.
pub trait CaptureSink: Send {
    fn begin(&mut self, size: CanvasSize, fps: u32) -> Result<(), ExportError>;
    fn push_frame(&mut self, rgba: &[u8]) -> Result<(), ExportError>;
    /// Flush and return the finished object. Called once.
    fn finish(&mut self) -> Result<Vec<u8>, ExportError>;
    /// Release every handle and discard buffered output.
    fn abort(&mut self);
}

/// Pipes raw frames into an `ffmpeg` child and collects WebM (VP9) from its stdout.
pub struct FfmpegSink {
    bin: String,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    stderr: Option<JoinHandle<String>>,
}

impl FfmpegSink {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into(), child: None, stdin: None, stdout: None, stderr: None }
    }

    fn args(size: CanvasSize, fps: u32) -> Vec<String> {
        let dims = format!("{}x{}", size.width, size.height);
        [
            "-hide_banner", "-loglevel", "error", "-y",
            "-f", "rawvideo", "-pix_fmt", "rgba", "-s", &dims, "-r", &fps.to_string(), "-i", "pipe:0",
            "-c:v", "libvpx-vp9", "-b:v", "0", "-crf", "32", "-deadline", "realtime", "-row-mt", "1",
            "-pix_fmt", "yuv420p", "-f", "webm", "pipe:1",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn encoder_error(&mut self, what: &str, detail: impl std::fmt::Display) -> ExportError {
        let stderr = self.stderr.take().and_then(|h| h.join().ok()).unwrap_or_default();
        let stderr = stderr.trim();
        if stderr.is_empty() {
            ExportError::EncodingFailure(format!("{what}: {detail}"))
        } else {
            ExportError::EncodingFailure(format!("{what}: {detail}\n{stderr}"))
        }
    }
}

impl CaptureSink for FfmpegSink {
    fn begin(&mut self, size: CanvasSize, fps: u32) -> Result<(), ExportError> {
        let mut child = Command::new(&self.bin)
            .args(Self::args(size, fps))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExportError::EncodingFailure(format!("failed to spawn {}: {e}", self.bin)))?;

        let mut out = child.stdout.take().ok_or_else(|| ExportError::EncodingFailure("ffmpeg stdout not captured".into()))?;
        let mut err = child.stderr.take().ok_or_else(|| ExportError::EncodingFailure("ffmpeg stderr not captured".into()))?;
        self.stdin = child.stdin.take();
        // Drain both pipes concurrently; ffmpeg stalls once either pipe fills.
        self.stdout = Some(thread::spawn(move || {
            let mut buf = Vec::new();
            out.read_to_end(&mut buf).map(|_| buf)
        }));
        self.stderr = Some(thread::spawn(move || {
            let mut s = String::new();
            let _ = err.read_to_string(&mut s);
            s
        }));
        self.child = Some(child);
        tracing::debug!(bin = %self.bin, width = size.width, height = size.height, fps, "ffmpeg capture started");
        Ok(())
    }

    fn push_frame(&mut self, rgba: &[u8]) -> Result<(), ExportError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ExportError::EncodingFailure("capture not started".into()));
        };
        if let Err(e) = stdin.write_all(rgba) {
            return Err(self.encoder_error("writing frame to ffmpeg", e));
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, ExportError> {
        // Closing stdin signals end of stream.
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return Err(ExportError::EncodingFailure("capture not started".into()));
        };
        let status = match child.wait() {
            Ok(s) => s,
            Err(e) => return Err(self.encoder_error("waiting for ffmpeg", e)),
        };
        let bytes = match self.stdout.take().map(|h| h.join()) {
            Some(Ok(Ok(bytes))) => bytes,
            Some(Ok(Err(e))) => return Err(self.encoder_error("reading ffmpeg output", e)),
            _ => return Err(self.encoder_error("reading ffmpeg output", "reader thread lost")),
        };
        if !status.success() {
            return Err(self.encoder_error("ffmpeg exited unsuccessfully", status));
        }
        if bytes.is_empty() {
            return Err(self.encoder_error("ffmpeg produced no output", status));
        }
        self.stderr.take();
        Ok(bytes)
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        // Readers see EOF once the child is gone.
        if let Some(h) = self.stdout.take() { let _ = h.join(); }
        if let Some(h) = self.stderr.take() { let _ = h.join(); }
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

/// Keeps raw frames in memory; `finish` concatenates them. Useful for
/// headless pipelines that mux elsewhere, and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub size: Option<CanvasSize>,
    pub fps: u32,
    pub frames: usize,
    buf: Vec<u8>,
    started: bool,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }
}

impl CaptureSink for MemorySink {
    fn begin(&mut self, size: CanvasSize, fps: u32) -> Result<(), ExportError> {
        self.size = Some(size);
        self.fps = fps;
        self.started = true;
        Ok(())
    }

    fn push_frame(&mut self, rgba: &[u8]) -> Result<(), ExportError> {
        if !self.started {
            return Err(ExportError::EncodingFailure("capture not started".into()));
        }
        self.buf.extend_from_slice(rgba);
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, ExportError> {
        self.started = false;
        Ok(std::mem::take(&mut self.buf))
    }

    fn abort(&mut self) {
        self.started = false;
        self.frames = 0;
        self.buf = Vec::new();
    }
}
