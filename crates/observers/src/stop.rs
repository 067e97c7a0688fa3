//! Observers that end a run.

use simpack_core::Observer;
use thiserror::Error;

use crate::traits::{CanStopEarly, HasClock, HasStep};

/// Stops a run once a state's clock reaches a threshold.
///
/// The state that reaches the threshold is kept. Events without a clock
/// never stop the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopAtClock {
    clock: f64,
}

/// Errors that can occur when creating a [`StopAtClock`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StopAtClockError {
    #[error("clock threshold must be finite")]
    NotFinite,
}

impl StopAtClock {
    /// Creates an observer that stops at `clock`.
    ///
    /// # Errors
    ///
    /// Returns an error if `clock` is NaN or infinite.
    pub fn new(clock: f64) -> Result<Self, StopAtClockError> {
        if !clock.is_finite() {
            return Err(StopAtClockError::NotFinite);
        }
        Ok(Self { clock })
    }

    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }
}

impl<E: HasClock, A: CanStopEarly> Observer<E, A> for StopAtClock {
    fn observe(&mut self, event: &E) -> Option<A> {
        event
            .clock()
            .is_some_and(|clock| clock >= self.clock)
            .then(A::stop_early)
    }
}

/// Stops a run after a fixed number of steps.
///
/// Unlike lowering the driver's iteration count, the run reports
/// that it was stopped by an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAfterSteps {
    steps: usize,
}

impl StopAfterSteps {
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<E: HasStep, A: CanStopEarly> Observer<E, A> for StopAfterSteps {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.step() >= self.steps).then(A::stop_early)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use simpack_core::{Simpack, State, StepArgs, StepProfile};
    use simpack_crunch::{Action, GrokkerRegistry, Status, list_simulate_observed};

    // --- Test fixtures ---

    /// Falls at a fixed speed; the clock advances by `dt` each step.
    #[derive(Debug, Clone, PartialEq)]
    struct Fall {
        height: f64,
        clock: Option<f64>,
    }

    impl State for Fall {
        fn clock(&self) -> Option<f64> {
            self.clock
        }

        fn set_clock(&mut self, clock: f64) {
            self.clock = Some(clock);
        }

        fn simpack() -> Simpack<Self> {
            Simpack::new("fall").with_step(|state: &Fall, _: &StepProfile<Fall>| {
                let dt = 0.25;
                Ok(Fall {
                    height: state.height - 2.0 * dt,
                    clock: state.clock.map(|clock| clock + dt),
                })
            })
        }
    }

    fn start() -> Fall {
        Fall {
            height: 10.0,
            clock: None,
        }
    }

    // --- Tests ---

    #[test]
    fn rejects_non_finite_clock() {
        assert_eq!(StopAtClock::new(f64::NAN), Err(StopAtClockError::NotFinite));
        assert_eq!(
            StopAtClock::new(f64::INFINITY),
            Err(StopAtClockError::NotFinite)
        );
        assert_relative_eq!(StopAtClock::new(1.5).unwrap().clock(), 1.5);
    }

    #[test]
    fn stops_when_clock_is_reached() {
        let mut registry = GrokkerRegistry::new();
        let observer = StopAtClock::new(1.0).unwrap();

        let solution =
            list_simulate_observed(&mut registry, &start(), 100, StepArgs::new(), observer)
                .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 4);

        let last = solution.final_state().unwrap();
        assert_relative_eq!(last.clock.unwrap(), 1.0);
        assert_relative_eq!(last.height, 8.0);
    }

    #[test]
    fn stops_after_steps() {
        let mut registry = GrokkerRegistry::new();

        let solution = list_simulate_observed(
            &mut registry,
            &start(),
            100,
            StepArgs::new(),
            StopAfterSteps::new(3),
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.states.len(), 4);
    }

    #[test]
    fn completes_when_threshold_is_never_reached() {
        let mut registry = GrokkerRegistry::new();
        let observer = StopAtClock::new(100.0).unwrap();

        let solution =
            list_simulate_observed(&mut registry, &start(), 2, StepArgs::new(), observer).unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 2);
    }

    #[test]
    fn works_with_plain_events() {
        let mut observer = StopAfterSteps::new(0);

        let action: Option<Action> = observer.observe(&simpack_crunch::Event {
            step: 0,
            state: start(),
        });

        assert_eq!(action, Some(Action::StopEarly));
    }
}
