//! Runtime configuration from the environment (and an optional `.env`).
//!
//! | Variable                 | Meaning                         | Default            |
//! |--------------------------|---------------------------------|--------------------|
//! | `COMPOSELY_OUTPUT_DIR`   | Directory captures are saved to | Pictures directory |
//! | `COMPOSELY_FILE_NAME`    | Base name of the saved file     | Unix time (ms)     |
//! | `COMPOSELY_JPEG_QUALITY` | Raster quality, 1–100           | 100                |
//! | `COMPOSELY_FRAME_SIZE`   | Frame size as `WIDTHxHEIGHT`    | 360x640            |

use crate::capture::{ExportOptions, FULL_QUALITY};
use std::path::PathBuf;

pub const DEFAULT_FRAME_SIZE: (u32, u32) = (360, 640);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub file_name: Option<String>,
    pub jpeg_quality: u8,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("[CONFIG] Loaded {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Bad values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output_dir = lookup("COMPOSELY_OUTPUT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_output_dir);

        let file_name = lookup("COMPOSELY_FILE_NAME").filter(|name| !name.trim().is_empty());

        let jpeg_quality = match lookup("COMPOSELY_JPEG_QUALITY") {
            Some(raw) => match raw.trim().parse::<u8>() {
                Ok(q) if (1..=FULL_QUALITY).contains(&q) => q,
                _ => {
                    log::warn!("[CONFIG] Ignoring COMPOSELY_JPEG_QUALITY={:?}", raw);
                    FULL_QUALITY
                }
            },
            None => FULL_QUALITY,
        };

        let (frame_width, frame_height) = match lookup("COMPOSELY_FRAME_SIZE") {
            Some(raw) => parse_frame_size(&raw).unwrap_or_else(|| {
                log::warn!("[CONFIG] Ignoring COMPOSELY_FRAME_SIZE={:?}", raw);
                DEFAULT_FRAME_SIZE
            }),
            None => DEFAULT_FRAME_SIZE,
        };

        Self {
            output_dir,
            file_name,
            jpeg_quality,
            frame_width,
            frame_height,
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            output_dir: self.output_dir.clone(),
            file_name: self.file_name.clone(),
            quality: self.jpeg_quality,
        }
    }
}

/// The user's Pictures directory, or the working directory when unknown.
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn parse_frame_size(raw: &str) -> Option<(u32, u32)> {
    let (w, h) = raw.trim().split_once(['x', 'X'])?;
    let width = w.trim().parse::<u32>().ok().filter(|&w| w > 0)?;
    let height = h.trim().parse::<u32>().ok().filter(|&h| h > 0)?;
    Some((width, height))
}
