//! Conditional application of transformations.

/// Applies one of two transformations depending on a condition.
///
/// Implemented for every type, so it chains on modifiers as well as on plain
/// values:
///
/// ```
/// use composely_lib::ui::{ApplyIf, Modifier};
/// use composely_lib::graphics::BLACK;
///
/// let selected = true;
/// let modifier = Modifier::new().apply_if(selected, |m| m.background(BLACK));
/// assert_ne!(modifier, Modifier::new());
/// ```
pub trait ApplyIf: Sized {
    /// `on_true(self)` when `condition` holds, otherwise `self` unchanged.
    fn apply_if(self, condition: bool, on_true: impl FnOnce(Self) -> Self) -> Self {
        self.apply_if_else(condition, on_true, |this| this)
    }

    /// Runs exactly one of the two branches.
    fn apply_if_else(
        self,
        condition: bool,
        on_true: impl FnOnce(Self) -> Self,
        on_false: impl FnOnce(Self) -> Self,
    ) -> Self {
        if condition {
            on_true(self)
        } else {
            on_false(self)
        }
    }
}

impl<T> ApplyIf for T {}
