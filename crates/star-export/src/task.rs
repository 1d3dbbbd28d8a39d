// File: crates/star-export/src/task.rs
// Summary: Runs one export job on its own thread behind a cancellation token and progress channel.

use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;

use crate::context::{CancellationToken, ExportContext, Percent};
use crate::error::ExportError;
use crate::ExportJob;

/// Handle to a running export. Dropping it without `join` cancels the job.
pub struct ExportTask {
    token: CancellationToken,
    progress: Receiver<Percent>,
    handle: Option<JoinHandle<Result<Vec<u8>, ExportError>>>,
}

impl ExportTask {
    /// Build the job on the worker thread (surfaces stay on the thread that owns them) and run it.
    pub fn spawn<J, F>(make_job: F, progress_capacity: usize) -> Self
    where
        J: ExportJob,
        F: FnOnce() -> J + Send + 'static,
    {
        let (mut ctx, progress) = ExportContext::with_progress(progress_capacity);
        let token = ctx.token();
        let handle = thread::spawn(move || {
            let job = make_job();
            tracing::debug!(kind = ?job.kind(), "export task started");
            job.run(&mut ctx)
        });
        Self { token, progress, handle: Some(handle) }
    }

    pub fn token(&self) -> CancellationToken { self.token.clone() }
    pub fn progress(&self) -> &Receiver<Percent> { &self.progress }
    pub fn cancel(&self) { self.token.cancel(); }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Wait for the artifact. A panicked job reports as an encoding failure.
    pub fn join(mut self) -> Result<Vec<u8>, ExportError> {
        let handle = self.handle.take().ok_or(ExportError::Cancelled)?;
        handle
            .join()
            .unwrap_or_else(|_| Err(ExportError::EncodingFailure("export thread panicked".into())))
    }
}

impl Drop for ExportTask {
    fn drop(&mut self) {
        if let Some(h) = self.handle.take() {
            self.token.cancel();
            let _ = h.join();
        }
    }
}
