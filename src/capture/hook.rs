//! The capturing modifier.
//!
//! While the state is `Capturing`, the next draw pass is recorded into a
//! picture, the picture is replayed onto the real surface so the frame looks
//! the same, and the state moves to `Captured` (or `Error`).

use super::state::{CaptureState, CapturingProgress};
use crate::graphics::{DrawError, Picture, PictureRecorder};
use crate::ui::{ApplyIf, ContentDrawScope, Modifier};
use std::sync::Arc;

impl Modifier {
    /// Records the next draw pass of everything after this point in the chain.
    ///
    /// Returns the chain unchanged unless `state` is currently capturing.
    pub fn capture(self, state: &CaptureState) -> Modifier {
        let state = state.clone();
        self.apply_if(state.is_capturing(), move |modifier| {
            modifier.draw_with_content(move |scope| capture_draw(&state, scope))
        })
    }
}

fn capture_draw(state: &CaptureState, scope: &mut ContentDrawScope<'_>) -> Result<(), DrawError> {
    // A reused chain can outlive the capture it was built for.
    if !state.is_capturing() {
        return scope.draw_content();
    }

    match record(scope) {
        Ok(picture) => {
            log::info!(
                "[CAPTURE] Recorded {}x{} picture ({} ops)",
                picture.width(),
                picture.height(),
                picture.ops().len()
            );
            state.set_progress(CapturingProgress::Captured(picture));
        }
        Err(e) => {
            log::warn!("[CAPTURE] Capture failed: {}", e);
            state.set_progress(CapturingProgress::Error(Arc::new(e)));
            if let Err(e) = scope.draw_content() {
                log::warn!("[CAPTURE] Content draw after failed capture also failed: {}", e);
            }
        }
    }
    Ok(())
}

fn record(scope: &mut ContentDrawScope<'_>) -> Result<Picture, CaptureError> {
    let (width, height) = scope.size().to_pixels();
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyBounds { width, height });
    }

    let mut recording = PictureRecorder::begin_recording(width, height);
    scope.draw_content_into(&mut recording)?;
    let picture = recording.end_recording();

    scope.canvas().draw_picture(&picture);
    Ok(picture)
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture bounds are empty ({width}x{height})")]
    EmptyBounds { width: u32, height: u32 },

    #[error(transparent)]
    Draw(#[from] DrawError),
}
