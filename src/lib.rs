//! Composely application entry point.
//!
//! This is the app shell that wires together:
//! - Drawing layer (graphics/)
//! - Modifiers, draw pass and the greeting screen (ui/)
//! - Screen capture domain (capture/)
//! - Environment configuration (config.rs)

pub mod capture;
pub mod config;
pub mod graphics;
pub mod ui;

use capture::{CaptureState, CapturingProgress, ExportError};
use config::AppConfig;
use graphics::{DrawError, PixelBuffer, Size, WHITE};
use std::path::PathBuf;
use ui::{render_frame, Greeting, Modifier};

const SCREEN_PADDING: f32 = 16.0;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Frame rendering failed: {0}")]
    Render(#[from] DrawError),

    #[error("Capture export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Capture state closed before the capture finished")]
    StateClosed,
}

/// The single screen: a padded greeting whose content is captured once.
pub struct MainScreen {
    greeting: Greeting,
    capture_state: CaptureState,
    frame_size: (u32, u32),
}

impl MainScreen {
    pub fn new(name: &str, frame_size: (u32, u32)) -> Self {
        Self {
            greeting: Greeting::new(name),
            capture_state: CaptureState::new(),
            frame_size,
        }
    }

    pub fn capture_state(&self) -> &CaptureState {
        &self.capture_state
    }

    /// Rebuilds the modifier chain from the current state and draws a frame.
    pub fn render(&self) -> Result<PixelBuffer, DrawError> {
        let modifier = Modifier::new()
            .padding_all(SCREEN_PADDING)
            .capture(&self.capture_state);
        let (width, height) = self.frame_size;
        render_frame(width, height, WHITE, |canvas, size: Size| {
            self.greeting.draw(&modifier, canvas, size)
        })
    }

    /// Requests a capture, draws the frame that performs it, and exports
    /// the result once the state reports it.
    ///
    /// Returns the saved file, or `None` when the capture or the save failed.
    pub async fn capture_to_file(&self, config: &AppConfig) -> Result<Option<PathBuf>, AppError> {
        let mut progress = self.capture_state.subscribe();
        self.capture_state.capture();
        self.render()?;

        progress.changed().await.map_err(|_| AppError::StateClosed)?;
        let current = progress.borrow_and_update().clone();
        let captured = match current {
            CapturingProgress::Captured(picture) => Some(picture),
            CapturingProgress::Error(e) => {
                log::warn!("[CAPTURE] Capture ended in error: {}", e);
                None
            }
            CapturingProgress::Idle | CapturingProgress::Capturing => {
                log::warn!("[CAPTURE] Frame finished without completing the capture");
                None
            }
        };

        // The state left Capturing, so this frame draws without the hook.
        self.render()?;

        match captured {
            Some(picture) => Ok(capture::export_picture(picture, config.export_options()).await?),
            None => Ok(None),
        }
    }
}

/// Entry point, called by the binary.
pub fn run() {
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!("Composely starting up, saving captures to {}", config.output_dir.display());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Error building Tokio runtime");

    let screen = MainScreen::new("Android", (config.frame_width, config.frame_height));
    match runtime.block_on(screen.capture_to_file(&config)) {
        Ok(file) => log::info!("captured file name: {:?}", file),
        Err(e) => log::error!("Capture run failed: {}", e),
    }
}
