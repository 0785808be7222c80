//! Picture → pixel buffer conversion.
//!
//! Pure functional core: no I/O, no shared state.

use crate::graphics::{PixelBuffer, PixelCanvas, Picture};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

/// Quality at which no lossy round trip happens.
pub const FULL_QUALITY: u8 = 100;

/// Replays `picture` onto a fresh transparent buffer of the same size.
pub fn rasterize(picture: &Picture) -> Result<PixelBuffer, RasterError> {
    rasterize_with_quality(picture, FULL_QUALITY)
}

/// Like [`rasterize`], then degrades the pixels through a JPEG
/// encode/decode at `quality` when it is below 100.
///
/// Quality is clamped to `1..=100`. The round trip drops alpha, so a
/// degraded buffer is fully opaque.
pub fn rasterize_with_quality(picture: &Picture, quality: u8) -> Result<PixelBuffer, RasterError> {
    let (width, height) = (picture.width(), picture.height());
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyPicture { width, height });
    }

    let mut canvas = PixelCanvas::new(width, height);
    picture.playback(&mut canvas);
    let buffer = canvas.into_image();

    if quality >= FULL_QUALITY {
        return Ok(buffer);
    }
    degrade(buffer, quality.max(1))
}

fn degrade(buffer: PixelBuffer, quality: u8) -> Result<PixelBuffer, RasterError> {
    let rgb = DynamicImage::ImageRgba8(buffer).to_rgb8();

    let mut jpeg_bytes: Vec<u8> = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_bytes, quality).encode_image(&rgb)?;
    log::debug!(
        "[RASTER] Lossy round trip at quality {} ({} bytes)",
        quality,
        jpeg_bytes.len()
    );

    let decoded = image::load_from_memory_with_format(&jpeg_bytes, ImageFormat::Jpeg)?;
    Ok(decoded.to_rgba8())
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Picture has no area ({width}x{height})")]
    EmptyPicture { width: u32, height: u32 },

    #[error("JPEG round trip failed: {0}")]
    Codec(#[from] image::ImageError),
}
