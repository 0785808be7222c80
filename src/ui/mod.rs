//! Declarative UI pieces: public API.
//!
//! Modifiers describe decoration, `render` runs the draw pass over them,
//! and `screen` holds the app's only screen.

mod extensions;
mod modifier;
mod render;
mod screen;

pub use extensions::ApplyIf;
pub use modifier::{DrawHook, Modifier, ModifierElement};
pub use render::{draw, render_frame, ContentDrawScope};
pub use screen::Greeting;
