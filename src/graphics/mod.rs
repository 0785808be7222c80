//! Retained-mode drawing layer: public API.
//!
//! Everything the UI draws goes through the [`Canvas`] trait. A canvas is
//! either a real pixel surface ([`PixelCanvas`]) or a recorder that turns
//! draw calls into an immutable [`Picture`] for later replay.

mod canvas;
mod geometry;
mod picture;

pub use canvas::{Canvas, DrawError, PixelCanvas};
pub use geometry::{Padding, Point, Rect, Size};
pub use picture::{DrawOp, Picture, PictureRecorder, RecordingCanvas};

use image::{Rgba, RgbaImage};

/// 8-bit RGBA color, straight (non-premultiplied) alpha.
pub type Color = Rgba<u8>;

/// Rasterized grid of RGBA pixels, owned by whoever created it.
pub type PixelBuffer = RgbaImage;

pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);
pub const WHITE: Color = Rgba([255, 255, 255, 255]);
pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const LIGHT_GRAY: Color = Rgba([204, 204, 204, 255]);
pub const DARK_GRAY: Color = Rgba([68, 68, 68, 255]);
