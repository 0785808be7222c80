//! The draw pass: walks a modifier chain over a bounds size.
//!
//! Padding translates and shrinks the bounds for everything after it,
//! background fills the current bounds, and a draw-with-content element
//! receives the rest of the chain as its content.

use super::modifier::{Modifier, ModifierElement};
use crate::graphics::{Canvas, Color, DrawError, PixelBuffer, PixelCanvas, Rect, Size};

type ContentFn<'a> = dyn FnMut(&mut dyn Canvas) -> Result<(), DrawError> + 'a;

/// What a draw-with-content hook sees during the draw pass.
pub struct ContentDrawScope<'a> {
    size: Size,
    canvas: &'a mut dyn Canvas,
    content: &'a mut ContentFn<'a>,
}

impl<'a> ContentDrawScope<'a> {
    /// Bounds of the element the hook is attached to.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The real output surface.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Draws the wrapped content onto the real output surface.
    pub fn draw_content(&mut self) -> Result<(), DrawError> {
        (self.content)(&mut *self.canvas)
    }

    /// Draws the wrapped content onto some other surface instead.
    pub fn draw_content_into(&mut self, target: &mut dyn Canvas) -> Result<(), DrawError> {
        (self.content)(target)
    }
}

/// Runs one draw pass of `modifier` followed by `content`.
pub fn draw(
    modifier: &Modifier,
    size: Size,
    canvas: &mut dyn Canvas,
    content: &mut dyn FnMut(&mut dyn Canvas, Size) -> Result<(), DrawError>,
) -> Result<(), DrawError> {
    draw_chain(modifier.elements(), size, canvas, content)
}

fn draw_chain(
    elements: &[ModifierElement],
    size: Size,
    canvas: &mut dyn Canvas,
    content: &mut dyn FnMut(&mut dyn Canvas, Size) -> Result<(), DrawError>,
) -> Result<(), DrawError> {
    let Some((first, rest)) = elements.split_first() else {
        return content(canvas, size);
    };

    match first {
        ModifierElement::Padding(padding) => {
            canvas.save();
            canvas.translate(padding.left, padding.top);
            let result = draw_chain(rest, padding.shrink(size), canvas, content);
            canvas.restore();
            result
        }
        ModifierElement::Background(color) => {
            canvas.fill_rect(Rect::from_size(size), *color);
            draw_chain(rest, size, canvas, content)
        }
        ModifierElement::DrawWithContent(hook) => {
            let mut inner = |target: &mut dyn Canvas| draw_chain(rest, size, target, &mut *content);
            let mut scope = ContentDrawScope {
                size,
                canvas,
                content: &mut inner,
            };
            hook.call(&mut scope)
        }
    }
}

/// Draws one full frame onto a fresh surface filled with `background`.
pub fn render_frame<F>(
    width: u32,
    height: u32,
    background: Color,
    draw_frame: F,
) -> Result<PixelBuffer, DrawError>
where
    F: FnOnce(&mut dyn Canvas, Size) -> Result<(), DrawError>,
{
    let size = Size::new(width as f32, height as f32);
    let mut canvas = PixelCanvas::new(width, height);
    canvas.fill_rect(Rect::from_size(size), background);
    draw_frame(&mut canvas, size)?;
    Ok(canvas.into_image())
}
