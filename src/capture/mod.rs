//! Screen capture domain: public API.
//!
//! A capture goes through three steps:
//! 1. `CaptureState::capture()` arms the state machine.
//! 2. A `Modifier::capture(&state)` in the draw chain records the next draw
//!    pass into a `Picture` and publishes it as `Captured`.
//! 3. The picture is rasterized and written to disk, off the render thread.

mod export;
mod hook;
mod persist;
mod raster;
mod state;

pub use export::{export_picture, ExportError, ExportOptions};
pub use hook::CaptureError;
pub use persist::{save_as_file, save_as_file_async, FILE_EXTENSION};
pub use raster::{rasterize, rasterize_with_quality, RasterError, FULL_QUALITY};
pub use state::{CaptureState, CapturingProgress};
