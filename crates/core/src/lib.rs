//! Core traits and types for stepping simpack simulations.
//!
//! A simpack ("simulation package") supplies the domain logic that advances a
//! world-state by one step. This crate defines the shared vocabulary that the
//! grokker, the simulation drivers, and observers build on:
//!
//! - [`State`]: a value-like world-state with an optional simulation clock
//! - [`Persistent`]: a sub-object shared, not duplicated, when a state is copied
//! - [`StepFunction`]: a named step callable in one of four shapes
//! - [`StepProfile`]: the chosen step function plus fixed arguments for a run
//! - [`Simpack`]: a descriptor declaring which step functions a simpack provides
//! - [`history`]: the history tree and the read-only [`HistoryBrowser`]
//! - [`Observer`]: receives simulation events and optionally returns actions

mod error;
pub mod history;
mod observer;
mod profile;
mod simpack;
mod state;
mod step;

pub use error::StepError;
pub use history::HistoryBrowser;
pub use observer::Observer;
pub use profile::{Arg, ArgPosition, STEP_FUNCTION_KEYWORD, StepArgs, StepProfile, StepProfileError};
pub use simpack::Simpack;
pub use state::{Persistent, State};
pub use step::{
    Flavor, HistoryStepFn, HistoryStepGeneratorFn, Shape, SimpleStepFn, StepFunction,
    StepGeneratorFn, StepInput, StepIter, StepKind, StepResult,
};
