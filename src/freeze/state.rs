use std::{ops::Deref, sync::Arc};

use crate::foundation::error::{AnimError, AnimResult};

/// Mutability lifecycle of animation objects. `Frozen` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FreezeState {
    /// Freshly created or cloned; mutation allowed, must stay on one thread.
    #[default]
    Mutable,
    /// Permanently immutable; safe to share for concurrent reads.
    Frozen,
}

/// Objects that follow the freeze/copy-on-write protocol.
///
/// Freezing is all-or-nothing: [`Freezable::freeze`] first walks the owned graph with
/// [`Freezable::can_freeze`] and only commits through [`Freezable::freeze_owned`] when
/// nothing objected.
pub trait Freezable {
    /// Current lifecycle state.
    fn freeze_state(&self) -> FreezeState;

    /// Shorthand for `freeze_state() == Frozen`.
    fn is_frozen(&self) -> bool {
        self.freeze_state() == FreezeState::Frozen
    }

    /// Dry run: could this object and everything it owns be frozen right now?
    fn can_freeze(&self) -> bool;

    /// Commit: mark this object and everything it owns frozen.
    ///
    /// Only called after `can_freeze` returned true for the same graph.
    fn freeze_owned(&mut self);

    /// Freeze in place. Freezing a frozen object is a no-op.
    fn freeze(&mut self) -> AnimResult<()> {
        if self.is_frozen() {
            return Ok(());
        }
        if !self.can_freeze() {
            tracing::debug!("freeze refused: owned graph holds live bindings");
            return Err(AnimError::not_freezable(
                "object graph still holds live value bindings",
            ));
        }
        self.freeze_owned();
        Ok(())
    }

    /// Deep copy with every bound expression replaced by its current value.
    /// The copy is mutable.
    fn clone_current_value(&self) -> Self
    where
        Self: Sized;

    /// Frozen copy built from resolved values.
    ///
    /// Animation objects carry no animated sub-properties of their own, so base and current
    /// values coincide and this is equivalent to [`Freezable::get_current_value_as_frozen`].
    fn get_as_frozen(&self) -> AnimResult<Frozen<Self>>
    where
        Self: Sized,
    {
        Frozen::new(self.clone_current_value())
    }

    /// Frozen copy of [`Freezable::clone_current_value`].
    fn get_current_value_as_frozen(&self) -> AnimResult<Frozen<Self>>
    where
        Self: Sized,
    {
        Frozen::new(self.clone_current_value())
    }
}

pub(crate) fn ensure_mutable(state: FreezeState, what: &str) -> AnimResult<()> {
    match state {
        FreezeState::Mutable => Ok(()),
        FreezeState::Frozen => Err(AnimError::frozen(format!("cannot modify frozen {what}"))),
    }
}

/// Shared handle to a frozen object.
///
/// Only constructible from an object that froze successfully, so holders never need to
/// re-check the flag. Cloning the handle shares the same allocation.
#[derive(Debug)]
pub struct Frozen<T>(Arc<T>);

impl<T: Freezable> Frozen<T> {
    /// Freeze `value` and wrap it for sharing.
    pub fn new(mut value: T) -> AnimResult<Self> {
        value.freeze()?;
        Ok(Self(Arc::new(value)))
    }
}

impl<T: Freezable> Frozen<T> {
    /// Wrap an object the caller already froze.
    pub(crate) fn assume_frozen(value: T) -> Self {
        debug_assert!(value.is_frozen());
        Self(Arc::new(value))
    }
}

impl<T> Frozen<T> {
    /// True when both handles point at the same frozen object.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: Clone> Frozen<T> {
    /// Mutable deep copy of the frozen object.
    pub fn to_mutable(&self) -> T {
        (*self.0).clone()
    }
}

impl<T> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/freeze/state.rs"]
mod tests;
