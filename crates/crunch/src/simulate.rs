//! Synchronous simulation drivers.
//!
//! [`iter_simulate`] is the primitive: a lazy sequence of states that the
//! caller pulls one step at a time. The eager drivers run it to the end:
//!
//! - [`simulate()`] returns only the final state.
//! - [`list_simulate`] returns every state along with how the run ended.
//! - [`list_simulate_observed`] also lets an [`Observer`] stop the run early.
//!
//! # Example
//!
//! ```
//! use simpack_core::{Simpack, State, StepArgs, StepError, StepProfile};
//! use simpack_crunch::{GrokkerRegistry, Status, list_simulate};
//!
//! #[derive(Debug, Clone)]
//! struct Tank {
//!     level: f64,
//!     clock: Option<f64>,
//! }
//!
//! impl State for Tank {
//!     fn clock(&self) -> Option<f64> {
//!         self.clock
//!     }
//!
//!     fn set_clock(&mut self, clock: f64) {
//!         self.clock = Some(clock);
//!     }
//!
//!     fn simpack() -> Simpack<Self> {
//!         Simpack::new("tank").with_step(|tank: &Tank, profile: &StepProfile<Tank>| {
//!             let dt = profile.kwarg_as::<f64>("dt").map_err(StepError::failed)?.unwrap_or(1.0);
//!             if tank.level <= 0.0 {
//!                 return Err(StepError::WorldEnded);
//!             }
//!             Ok(Tank {
//!                 level: tank.level - dt,
//!                 clock: tank.clock.map(|clock| clock + dt),
//!             })
//!         })
//!     }
//! }
//!
//! let mut registry = GrokkerRegistry::new();
//! let start = Tank { level: 0.5, clock: None };
//! let args = StepArgs::new().kwarg("dt", serde_json::json!(0.25));
//!
//! let solution = list_simulate(&mut registry, &start, 100, args)?;
//!
//! assert_eq!(solution.status, Status::WorldEnded);
//! assert_eq!(solution.steps, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod action;
mod error;
mod event;
mod iter;
mod solution;
mod world_end;

pub use action::Action;
pub use error::SimulateError;
pub use event::Event;
pub use iter::{IterSimulate, Termination};
pub use solution::{Solution, Status};

use simpack_core::{Observer, State, StepArgs, StepProfile};
use tracing::debug;

use crate::GrokkerRegistry;

/// Starts a lazy simulation from `state`.
///
/// # Algorithm
///
/// 1. Grok the simpack of `S`, reusing the registry's cached grokker.
/// 2. Build the step profile from `args`, defaulting to the grokker's
///    default step function.
/// 3. Copy `state`, setting its clock to zero if it has none. The caller's
///    state is never modified.
/// 4. For a history-dependent simpack, root a new history tree at the copy
///    and bind a browser to the path through it.
///
/// Nothing is stepped until the returned iterator is pulled.
///
/// # Errors
///
/// Returns an error if the simpack is invalid, the arguments do not form a
/// valid step profile, or the chosen step function has a different history
/// dependence than the simpack.
pub fn iter_simulate<S: State>(
    registry: &mut GrokkerRegistry,
    state: &S,
    iterations: usize,
    args: StepArgs<S>,
) -> Result<IterSimulate<S>, SimulateError> {
    let grokker = registry.create_from_state(state)?;
    let profile = StepProfile::build_with_default_step_function(
        grokker.default_step_function().clone(),
        args,
    )?;

    if profile.step_function().is_history_dependent() != grokker.history_dependent() {
        return Err(SimulateError::IncompatibleStepFunction {
            function: profile.step_function().name().to_owned(),
            simpack: grokker.simpack().name().to_owned(),
        });
    }

    let mut initial = state.clone();
    if initial.clock().is_none() {
        initial.set_clock(0.0);
    }

    debug!(
        simpack = grokker.simpack().name(),
        profile = %profile,
        iterations,
        history_dependent = grokker.history_dependent(),
        "starting simulation"
    );

    Ok(IterSimulate::new(grokker, profile, initial, iterations))
}

/// Runs a simulation and returns its final state.
///
/// # Errors
///
/// Returns an error if the run cannot be set up (see [`iter_simulate`]) or
/// a step fails.
pub fn simulate<S: State>(
    registry: &mut GrokkerRegistry,
    state: &S,
    iterations: usize,
    args: StepArgs<S>,
) -> Result<S, SimulateError> {
    let mut states = iter_simulate(registry, state, iterations, args)?;
    let initial = states.initial_state().clone();

    states
        .try_fold(initial, |_, next| next)
        .map_err(SimulateError::from)
}

/// Runs a simulation and collects every state.
///
/// # Errors
///
/// Returns an error if the run cannot be set up (see [`iter_simulate`]) or
/// a step fails.
pub fn list_simulate<S: State>(
    registry: &mut GrokkerRegistry,
    state: &S,
    iterations: usize,
    args: StepArgs<S>,
) -> Result<Solution<S>, SimulateError> {
    list_simulate_observed(registry, state, iterations, args, ())
}

/// Runs a simulation, reporting each state to an observer.
///
/// The observer receives an [`Event`] for the start state (step 0) and for
/// every stepped state, and may return [`Action::StopEarly`] to end the run
/// with the states produced so far.
///
/// # Errors
///
/// Returns an error if the run cannot be set up (see [`iter_simulate`]) or
/// a step fails.
pub fn list_simulate_observed<S, Obs>(
    registry: &mut GrokkerRegistry,
    state: &S,
    iterations: usize,
    args: StepArgs<S>,
    mut observer: Obs,
) -> Result<Solution<S>, SimulateError>
where
    S: State,
    Obs: Observer<Event<S>, Action>,
{
    let mut run = iter_simulate(registry, state, iterations, args)?;
    let mut states = Vec::with_capacity(iterations.saturating_add(1).min(1024));

    for (step, next) in run.by_ref().enumerate() {
        let next = next?;
        states.push(next.clone());

        let event = Event { step, state: next };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                states,
                steps: step,
            });
        }
    }

    let status = match run.termination() {
        Some(Termination::WorldEnded) => Status::WorldEnded,
        _ => Status::Complete,
    };

    Ok(Solution {
        status,
        steps: states.len() - 1,
        states,
    })
}
