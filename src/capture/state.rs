//! Capture progress and its observable holder.

use super::CaptureError;
use crate::graphics::Picture;
use std::sync::Arc;
use tokio::sync::watch;

/// Where a capture currently stands. Every transition replaces the whole value.
#[derive(Debug, Clone)]
pub enum CapturingProgress {
    Idle,
    /// The next draw pass of a capturing modifier will be recorded.
    Capturing,
    Captured(Picture),
    Error(Arc<CaptureError>),
}

impl CapturingProgress {
    pub fn is_capturing(&self) -> bool {
        matches!(self, CapturingProgress::Capturing)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CapturingProgress::Idle => "idle",
            CapturingProgress::Capturing => "capturing",
            CapturingProgress::Captured(_) => "captured",
            CapturingProgress::Error(_) => "error",
        }
    }
}

/// Shared, observable capture state for one screen.
///
/// Clones are handles onto the same value. Subscribers see every change
/// before the mutating call returns.
#[derive(Clone)]
pub struct CaptureState {
    progress: Arc<watch::Sender<CapturingProgress>>,
}

impl CaptureState {
    pub fn new() -> Self {
        let (progress, _) = watch::channel(CapturingProgress::Idle);
        Self {
            progress: Arc::new(progress),
        }
    }

    pub fn progress(&self) -> CapturingProgress {
        self.progress.borrow().clone()
    }

    pub fn is_capturing(&self) -> bool {
        self.progress.borrow().is_capturing()
    }

    /// Requests a capture of the next draw pass.
    ///
    /// Always lands in `Capturing`, whatever the current state.
    pub fn capture(&self) {
        let previous = self.progress.send_replace(CapturingProgress::Capturing);
        log::debug!("[CAPTURE] {} -> capturing", previous.label());
    }

    pub fn subscribe(&self) -> watch::Receiver<CapturingProgress> {
        self.progress.subscribe()
    }

    pub(crate) fn set_progress(&self, progress: CapturingProgress) {
        let label = progress.label();
        let previous = self.progress.send_replace(progress);
        log::debug!("[CAPTURE] {} -> {}", previous.label(), label);
    }
}

impl Default for CaptureState {
    fn default() -> Self {
        Self::new()
    }
}
