// File: crates/star-export/src/context.rs
// Summary: Job-scoped cancellation token and bounded progress channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Cloneable cancellation flag shared between a job and whoever may cancel it.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.flag.store(true, Ordering::SeqCst); }
    pub fn is_cancelled(&self) -> bool { self.flag.load(Ordering::SeqCst) }
}

/// Integer percentage 0..=100; display only.
pub type Percent = u8;

/// Everything one export job needs from its caller. Never shared between jobs.
#[derive(Debug)]
pub struct ExportContext {
    cancel: CancellationToken,
    progress: Option<Sender<Percent>>,
    // Second handle on the same channel, used only to evict a stale value for the final 100.
    evict: Option<Receiver<Percent>>,
    last: Option<Percent>,
}

impl ExportContext {
    /// Context plus the receiving end of its progress channel.
    pub fn with_progress(capacity: usize) -> (Self, Receiver<Percent>) {
        let (tx, rx) = bounded(capacity.max(1));
        let ctx = Self { cancel: CancellationToken::new(), progress: Some(tx), evict: Some(rx.clone()), last: None };
        (ctx, rx)
    }

    /// Context that reports no progress.
    pub fn silent() -> Self {
        Self { cancel: CancellationToken::new(), progress: None, evict: None, last: None }
    }

    pub fn token(&self) -> CancellationToken { self.cancel.clone() }
    pub fn is_cancelled(&self) -> bool { self.cancel.is_cancelled() }

    /// Last value reported, if any.
    pub fn last_reported(&self) -> Option<Percent> { self.last }

    /// Publish a percentage. Values are clamped to 100 and never go backwards.
    /// A full channel drops intermediate values; the next report supersedes them.
    /// 100 is always delivered, displacing the oldest queued value if needed.
    pub fn report(&mut self, percent: u32) {
        let pct = percent.min(100) as Percent;
        let pct = self.last.map_or(pct, |last| last.max(pct));
        self.last = Some(pct);
        let Some(tx) = &self.progress else { return };
        match tx.try_send(pct) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) if pct == 100 => {
                if let Some(rx) = &self.evict {
                    let _ = rx.try_recv();
                }
                if tx.try_send(pct).is_err() {
                    tracing::debug!("progress channel still full; final update lost");
                }
            }
            Err(TrySendError::Full(_)) => tracing::trace!(pct, "progress channel full; dropping update"),
            Err(TrySendError::Disconnected(_)) => {
                self.progress = None;
                self.evict = None;
            }
        }
    }
}
