//! Simpack grokking and synchronous simulation drivers.
//!
//! - [`SimpackGrokker`] classifies a [`Simpack`] and normalizes whatever step
//!   functions it provides into a uniform `step` / `step_generator` pair.
//! - [`GrokkerRegistry`] grokks each simpack once and hands out the cached
//!   grokker afterwards.
//! - [`simulate`] holds the drivers: the lazy [`iter_simulate`] and the eager
//!   [`simulate()`], [`list_simulate`], and [`list_simulate_observed`].
//!
//! # Example
//!
//! ```
//! use simpack_core::{Simpack, State, StepArgs, StepProfile};
//! use simpack_crunch::{GrokkerRegistry, iter_simulate};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Counter {
//!     value: u64,
//!     clock: Option<f64>,
//! }
//!
//! impl State for Counter {
//!     fn clock(&self) -> Option<f64> {
//!         self.clock
//!     }
//!
//!     fn set_clock(&mut self, clock: f64) {
//!         self.clock = Some(clock);
//!     }
//!
//!     fn simpack() -> Simpack<Self> {
//!         Simpack::new("counter").with_step(|state: &Counter, _: &StepProfile<Counter>| {
//!             Ok(Counter {
//!                 value: state.value + 1,
//!                 clock: state.clock.map(|c| c + 1.0),
//!             })
//!         })
//!     }
//! }
//!
//! let mut registry = GrokkerRegistry::new();
//! let start = Counter { value: 0, clock: None };
//!
//! let values: Vec<u64> = iter_simulate(&mut registry, &start, 3, StepArgs::new())?
//!     .map(|state| state.map(|s| s.value))
//!     .collect::<Result<_, _>>()?;
//!
//! assert_eq!(values, vec![0, 1, 2, 3]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`Simpack`]: simpack_core::Simpack

pub mod grokker;
mod registry;
pub mod simulate;

#[cfg(test)]
mod test_utils;

pub use grokker::{Capabilities, InvalidSimpack, SimpackGrokker};
pub use registry::GrokkerRegistry;
pub use simulate::{
    Action, Event, IterSimulate, SimulateError, Solution, Status, Termination, iter_simulate,
    list_simulate, list_simulate_observed, simulate,
};
