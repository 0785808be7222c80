//! The drawing surface contract and its software-raster implementation.

use super::{Color, Picture, PixelBuffer, Point, Rect, TRANSPARENT};
use image::{ImageBuffer, Rgba};

/// Anything that accepts draw calls.
///
/// Primitives are infallible. Transform and clip state is a stack:
/// every `save` must be paired with a `restore`.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn clip_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);
    fn draw_picture(&mut self, picture: &Picture);
}

#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("Content drawing failed: {0}")]
    Content(String),
}

#[derive(Debug, Clone, Copy)]
struct Layer {
    dx: f32,
    dy: f32,
    clip: Rect,
}

/// Canvas backed by an in-memory RGBA buffer.
///
/// A pixel is covered when its center lies inside the shape.
/// Colors are composited source-over.
pub struct PixelCanvas {
    image: PixelBuffer,
    layers: Vec<Layer>,
}

impl PixelCanvas {
    /// Fresh, fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(ImageBuffer::from_pixel(width, height, TRANSPARENT))
    }

    pub fn from_image(image: PixelBuffer) -> Self {
        let bounds = Rect::new(0.0, 0.0, image.width() as f32, image.height() as f32);
        Self {
            image,
            layers: vec![Layer {
                dx: 0.0,
                dy: 0.0,
                clip: bounds,
            }],
        }
    }

    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    fn layer(&self) -> Layer {
        // The base layer is never popped.
        self.layers[self.layers.len() - 1]
    }

    fn layer_mut(&mut self) -> &mut Layer {
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    /// Pixel index range whose centers fall inside `[start, end)`.
    fn span(start: f32, end: f32, limit: u32) -> (u32, u32) {
        let lo = (start - 0.5).ceil().max(0.0) as u32;
        let hi = (end - 0.5).ceil().max(0.0) as u32;
        (lo.min(limit), hi.min(limit))
    }
}

impl Canvas for PixelCanvas {
    fn save(&mut self) {
        let top = self.layer();
        self.layers.push(top);
    }

    fn restore(&mut self) {
        if self.layers.len() > 1 {
            self.layers.pop();
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let layer = self.layer_mut();
        layer.dx += dx;
        layer.dy += dy;
    }

    fn clip_rect(&mut self, rect: Rect) {
        let layer = self.layer_mut();
        layer.clip = layer.clip.intersect(&rect.offset(layer.dx, layer.dy));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let layer = self.layer();
        let target = rect.offset(layer.dx, layer.dy).intersect(&layer.clip);
        if target.is_empty() {
            return;
        }

        let (x0, x1) = Self::span(target.left, target.right, self.image.width());
        let (y0, y1) = Self::span(target.top, target.bottom, self.image.height());
        for y in y0..y1 {
            for x in x0..x1 {
                blend(self.image.get_pixel_mut(x, y), color);
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let layer = self.layer();
        let (cx, cy) = (center.x + layer.dx, center.y + layer.dy);
        let bounds = Rect::new(cx - radius, cy - radius, cx + radius, cy + radius)
            .intersect(&layer.clip);
        if bounds.is_empty() {
            return;
        }

        let r2 = radius * radius;
        let (x0, x1) = Self::span(bounds.left, bounds.right, self.image.width());
        let (y0, y1) = Self::span(bounds.top, bounds.bottom, self.image.height());
        for y in y0..y1 {
            let py = y as f32 + 0.5 - cy;
            for x in x0..x1 {
                let px = x as f32 + 0.5 - cx;
                if px * px + py * py <= r2 {
                    blend(self.image.get_pixel_mut(x, y), color);
                }
            }
        }
    }

    fn draw_picture(&mut self, picture: &Picture) {
        picture.playback(self);
    }
}

/// Source-over compositing of straight-alpha colors.
fn blend(dst: &mut Rgba<u8>, src: Color) {
    let sa = src.0[3] as u32;
    if sa == 255 {
        *dst = src;
        return;
    }
    if sa == 0 {
        return;
    }

    let da = dst.0[3] as u32 * (255 - sa) / 255;
    let out_a = sa + da;
    for i in 0..3 {
        dst.0[i] = ((src.0[i] as u32 * sa + dst.0[i] as u32 * da) / out_a) as u8;
    }
    dst.0[3] = out_a as u8;
}
