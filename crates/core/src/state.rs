use std::{fmt, ops::Deref, sync::Arc};

use crate::Simpack;

/// A single instant of a simulated world.
///
/// States are value-like: stepping never mutates a state in place, it produces
/// a new one. The only attribute the engine relies on is the optional clock,
/// which simpacks advance as they step.
///
/// Cloning a state is the engine's deep copy. Sub-objects that should be shared
/// between copies instead of duplicated belong in a [`Persistent`].
pub trait State: Clone + 'static {
    /// Returns the simulation clock, or `None` if the state was never simulated.
    fn clock(&self) -> Option<f64>;

    /// Sets the simulation clock.
    fn set_clock(&mut self, clock: f64);

    /// Returns the simpack that steps this state type.
    fn simpack() -> Simpack<Self>;
}

/// A sub-object that is shared rather than copied when its state is cloned.
///
/// Use this for large or identity-bearing data (lookup tables, environment
/// descriptions, random seeds shared across a run) that every state in a
/// simulation should point at.
pub struct Persistent<T: ?Sized>(Arc<T>);

impl<T> Persistent<T> {
    /// Wraps a value so that clones of it share one allocation.
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl<T: ?Sized> Persistent<T> {
    /// Returns `true` if both handles point at the same shared value.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Persistent<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Persistent<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Persistent<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Persistent<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Persistent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Persistent").field(&&*self.0).finish()
    }
}
