//! The greeting screen.

use super::{draw, Modifier};
use crate::graphics::{Canvas, DrawError, Rect, Size, DARK_GRAY, LIGHT_GRAY};

/// Approximate advance of one label glyph, in logical pixels.
const GLYPH_WIDTH: f32 = 8.0;
const LINE_HEIGHT: f32 = 16.0;

/// A light-gray column holding a single "Hello {name}!" label.
///
/// Glyphs are not rasterized; the label is drawn as a bar with the
/// text's approximate extent.
#[derive(Debug, Clone)]
pub struct Greeting {
    name: String,
}

impl Greeting {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn text(&self) -> String {
        format!("Hello {}!", self.name)
    }

    pub fn draw(
        &self,
        modifier: &Modifier,
        canvas: &mut dyn Canvas,
        size: Size,
    ) -> Result<(), DrawError> {
        let modifier = modifier.clone().background(LIGHT_GRAY);
        draw(&modifier, size, canvas, &mut |canvas, bounds| {
            self.draw_label(canvas, bounds);
            Ok(())
        })
    }

    fn draw_label(&self, canvas: &mut dyn Canvas, bounds: Size) {
        let width = (self.text().chars().count() as f32 * GLYPH_WIDTH).min(bounds.width);
        let height = LINE_HEIGHT.min(bounds.height);
        canvas.fill_rect(Rect::new(0.0, 0.0, width, height), DARK_GRAY);
    }
}
