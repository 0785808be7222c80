//! Decoration chain attached to a piece of UI.
//!
//! A [`Modifier`] is an ordered list of elements. Order matters: a padding
//! shrinks the bounds seen by every element after it.

use super::render::ContentDrawScope;
use crate::graphics::{Color, DrawError, Padding};
use std::fmt;
use std::sync::Arc;

type DrawFn = dyn Fn(&mut ContentDrawScope<'_>) -> Result<(), DrawError> + Send + Sync;

/// Custom draw step that decides if, where and how the content is drawn.
#[derive(Clone)]
pub struct DrawHook(Arc<DrawFn>);

impl DrawHook {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut ContentDrawScope<'_>) -> Result<(), DrawError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, scope: &mut ContentDrawScope<'_>) -> Result<(), DrawError> {
        (self.0)(scope)
    }
}

impl PartialEq for DrawHook {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DrawHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DrawHook")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModifierElement {
    Padding(Padding),
    Background(Color),
    DrawWithContent(DrawHook),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Modifier {
    elements: Vec<ModifierElement>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[ModifierElement] {
        &self.elements
    }

    /// Appends every element of `other` after this chain.
    pub fn then(mut self, other: Modifier) -> Self {
        self.elements.extend(other.elements);
        self
    }

    pub fn padding(self, padding: Padding) -> Self {
        self.push(ModifierElement::Padding(padding))
    }

    pub fn padding_all(self, value: f32) -> Self {
        self.padding(Padding::all(value))
    }

    pub fn background(self, color: Color) -> Self {
        self.push(ModifierElement::Background(color))
    }

    pub fn draw_with_content<F>(self, f: F) -> Self
    where
        F: Fn(&mut ContentDrawScope<'_>) -> Result<(), DrawError> + Send + Sync + 'static,
    {
        self.push(ModifierElement::DrawWithContent(DrawHook::new(f)))
    }

    fn push(mut self, element: ModifierElement) -> Self {
        self.elements.push(element);
        self
    }
}
