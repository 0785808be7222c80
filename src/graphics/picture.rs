//! Recorded drawing commands.
//!
//! A [`Picture`] is produced once by a [`RecordingCanvas`] and never mutated
//! afterwards. Clones share the same command list.

use super::{Canvas, Color, Point, Rect};
use std::fmt;
use std::sync::Arc;

/// One recorded canvas call.
#[derive(Debug, Clone)]
pub enum DrawOp {
    Save,
    Restore,
    Translate { dx: f32, dy: f32 },
    ClipRect(Rect),
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Point, radius: f32, color: Color },
    DrawPicture(Picture),
}

#[derive(Clone)]
pub struct Picture {
    inner: Arc<PictureData>,
}

struct PictureData {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl Picture {
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    pub fn height(&self) -> u32 {
        self.inner.height
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.inner.ops
    }

    /// True if both handles point at the same recording.
    pub fn ptr_eq(&self, other: &Picture) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Replays the recording onto `canvas`, clipped to the intrinsic size.
    ///
    /// Leaves the canvas transform and clip exactly as it found them.
    pub fn playback(&self, canvas: &mut dyn Canvas) {
        canvas.save();
        canvas.clip_rect(Rect::new(
            0.0,
            0.0,
            self.inner.width as f32,
            self.inner.height as f32,
        ));
        for op in &self.inner.ops {
            match op {
                DrawOp::Save => canvas.save(),
                DrawOp::Restore => canvas.restore(),
                DrawOp::Translate { dx, dy } => canvas.translate(*dx, *dy),
                DrawOp::ClipRect(rect) => canvas.clip_rect(*rect),
                DrawOp::FillRect { rect, color } => canvas.fill_rect(*rect, *color),
                DrawOp::FillCircle {
                    center,
                    radius,
                    color,
                } => canvas.fill_circle(*center, *radius, *color),
                DrawOp::DrawPicture(picture) => picture.playback(canvas),
            }
        }
        canvas.restore();
    }
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture")
            .field("width", &self.inner.width)
            .field("height", &self.inner.height)
            .field("ops", &self.inner.ops.len())
            .finish()
    }
}

pub struct PictureRecorder;

impl PictureRecorder {
    /// Opens a recording surface of the given intrinsic size.
    pub fn begin_recording(width: u32, height: u32) -> RecordingCanvas {
        RecordingCanvas {
            width,
            height,
            ops: Vec::new(),
            depth: 0,
        }
    }
}

/// Canvas that appends every call to a command list.
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    depth: usize,
}

impl RecordingCanvas {
    /// Closes the recording. Unmatched saves are balanced with restores.
    pub fn end_recording(mut self) -> Picture {
        for _ in 0..self.depth {
            self.ops.push(DrawOp::Restore);
        }
        Picture {
            inner: Arc::new(PictureData {
                width: self.width,
                height: self.height,
                ops: self.ops,
            }),
        }
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        // Restores past the recording's own saves would pop the host's state on replay.
        if self.depth > 0 {
            self.depth -= 1;
            self.ops.push(DrawOp::Restore);
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(DrawOp::Translate { dx, dy });
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::ClipRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_picture(&mut self, picture: &Picture) {
        self.ops.push(DrawOp::DrawPicture(picture.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{PixelCanvas, BLACK, TRANSPARENT, WHITE};

    fn square_picture() -> Picture {
        let mut canvas = PictureRecorder::begin_recording(4, 4);
        canvas.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), BLACK);
        canvas.end_recording()
    }

    #[test]
    fn records_intrinsic_size_and_ops() {
        let picture = square_picture();
        assert_eq!((picture.width(), picture.height()), (4, 4));
        assert_eq!(picture.ops().len(), 1);
    }

    #[test]
    fn playback_clips_to_intrinsic_size() {
        let mut canvas = PixelCanvas::new(8, 8);
        square_picture().playback(&mut canvas);
        let image = canvas.into_image();

        assert_eq!(*image.get_pixel(3, 3), BLACK);
        assert_eq!(*image.get_pixel(4, 4), TRANSPARENT);
    }

    #[test]
    fn unmatched_saves_are_balanced() {
        let mut recording = PictureRecorder::begin_recording(4, 4);
        recording.save();
        recording.translate(2.0, 2.0);
        let picture = recording.end_recording();
        assert!(matches!(picture.ops().last(), Some(DrawOp::Restore)));

        let mut canvas = PixelCanvas::new(4, 4);
        picture.playback(&mut canvas);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), WHITE);
        assert_eq!(*canvas.into_image().get_pixel(0, 0), WHITE);
    }

    #[test]
    fn nested_pictures_replay_at_translation() {
        let inner = square_picture();
        let mut recording = PictureRecorder::begin_recording(8, 8);
        recording.translate(4.0, 4.0);
        recording.draw_picture(&inner);
        let outer = recording.end_recording();

        let mut canvas = PixelCanvas::new(8, 8);
        outer.playback(&mut canvas);
        let image = canvas.into_image();

        assert_eq!(*image.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(*image.get_pixel(5, 5), BLACK);
    }

    #[test]
    fn clones_share_the_recording() {
        let picture = square_picture();
        assert!(picture.ptr_eq(&picture.clone()));
        assert!(!picture.ptr_eq(&square_picture()));
    }
}
