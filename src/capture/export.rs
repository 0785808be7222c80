//! Picture → file pipeline, run off the render thread.

use super::persist::save_as_file;
use super::raster::{rasterize_with_quality, RasterError, FULL_QUALITY};
use crate::graphics::Picture;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    /// Base name without extension; a timestamp when `None`.
    pub file_name: Option<String>,
    /// Raster quality, see [`rasterize_with_quality`].
    pub quality: u8,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_name: None,
            quality: FULL_QUALITY,
        }
    }
}

/// Rasterizes and saves `picture` on tokio's blocking pool.
///
/// A raster failure is an error. A save failure is `Ok(None)`.
pub async fn export_picture(
    picture: Picture,
    options: ExportOptions,
) -> Result<Option<PathBuf>, ExportError> {
    let start = std::time::Instant::now();

    let task = tokio::task::spawn_blocking(move || {
        let buffer = rasterize_with_quality(&picture, options.quality)?;
        Ok::<_, RasterError>(save_as_file(
            &buffer,
            &options.output_dir,
            options.file_name.as_deref(),
        ))
    });
    let saved = task.await.map_err(|e| ExportError::Worker(e.to_string()))??;

    log::info!(
        "[EXPORT] Finished in {}ms ({})",
        start.elapsed().as_millis(),
        if saved.is_some() { "saved" } else { "not saved" }
    );
    Ok(saved)
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error("Export worker failed: {0}")]
    Worker(String),
}
