//! Capability traits for driver-agnostic observers.
//!
//! # Event traits
//!
//! - [`HasClock`]: events that carry a simulation clock
//! - [`HasStep`]: events that carry a step number
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use simpack_core::Observer;
//! use simpack_observers::traits::{CanStopEarly, HasClock};
//!
//! /// Stops once the clock stalls between two events.
//! struct StallDetector {
//!     last: Option<f64>,
//! }
//!
//! impl<E: HasClock, A: CanStopEarly> Observer<E, A> for StallDetector {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         let clock = event.clock();
//!         let stalled = clock.is_some() && clock == self.last;
//!         self.last = clock;
//!         stalled.then(A::stop_early)
//!     }
//! }
//! ```

use simpack_core::State;
use simpack_crunch::{Action, Event};

/// An event that carries the clock of a simulated state.
pub trait HasClock {
    /// Returns the clock, or `None` if the state has none.
    fn clock(&self) -> Option<f64>;
}

/// An event that carries its step number.
pub trait HasStep {
    /// Returns the step number, with 0 for the start state.
    fn step(&self) -> usize;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl<S: State> HasClock for Event<S> {
    fn clock(&self) -> Option<f64> {
        self.state.clock()
    }
}

impl<S> HasStep for Event<S> {
    fn step(&self) -> usize {
        self.step
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
