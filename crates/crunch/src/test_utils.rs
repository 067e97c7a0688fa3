//! Small simpacks shared by the crate's tests.
//!
//! Every simpack steps the same [`Tally`] shape. The marker type parameter
//! selects the rules, which keeps the simpacks distinct in a registry.

use std::{fmt, io, marker::PhantomData};

use simpack_core::{HistoryBrowser, Simpack, State, StepError, StepProfile, StepResult};

/// Selects the simpack that steps a [`Tally`].
pub(crate) trait Rules: 'static {
    fn simpack() -> Simpack<Tally<Self>>
    where
        Self: Sized;
}

/// An integer world-state.
///
/// Each derived state advances the clock by one.
pub(crate) struct Tally<R> {
    pub value: i64,
    pub clock: Option<f64>,
    rules: PhantomData<fn() -> R>,
}

impl<R> Tally<R> {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            clock: None,
            rules: PhantomData,
        }
    }

    pub fn with_value(&self, value: i64) -> Self {
        Self {
            value,
            clock: Some(self.clock.unwrap_or(0.0) + 1.0),
            rules: PhantomData,
        }
    }

    pub fn advanced(&self, by: i64) -> Self {
        self.with_value(self.value + by)
    }
}

impl<R> Clone for Tally<R> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            clock: self.clock,
            rules: PhantomData,
        }
    }
}

impl<R> PartialEq for Tally<R> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.clock == other.clock
    }
}

impl<R> fmt::Debug for Tally<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tally")
            .field("value", &self.value)
            .field("clock", &self.clock)
            .finish()
    }
}

impl<R: Rules> State for Tally<R> {
    fn clock(&self) -> Option<f64> {
        self.clock
    }

    fn set_clock(&mut self, clock: f64) {
        self.clock = Some(clock);
    }

    fn simpack() -> Simpack<Self> {
        R::simpack()
    }
}

/// Adds the `by` keyword argument (default 1) each step.
pub(crate) enum AddBy {}
pub(crate) type Counter = Tally<AddBy>;

impl Rules for AddBy {
    fn simpack() -> Simpack<Counter> {
        Simpack::new("counter").with_step(|state: &Counter, profile: &StepProfile<Counter>| {
            let by = profile
                .kwarg_as::<i64>("by")
                .map_err(StepError::failed)?
                .unwrap_or(1);
            Ok(state.advanced(by))
        })
    }
}

/// Generates `+1`, `+2`, `+4` from the starting value, then runs dry.
pub(crate) enum Leaps {}
pub(crate) type Leaper = Tally<Leaps>;

impl Rules for Leaps {
    fn simpack() -> Simpack<Leaper> {
        Simpack::new("leaper").with_step_generator(|state: Leaper, _: StepProfile<Leaper>| {
            [1, 2, 4].into_iter().map(move |by| Ok(state.advanced(by)))
        })
    }
}

/// Each state is the sum of the previous two (a missing one counts as zero).
pub(crate) enum Fib {}
pub(crate) type Fibonacci = Tally<Fib>;

impl Rules for Fib {
    fn simpack() -> Simpack<Fibonacci> {
        Simpack::new("fibonacci").with_history_step(
            |browser: &HistoryBrowser<Fibonacci>, _: &StepProfile<Fibonacci>| {
                let last = browser.last_state();
                let before = browser.get_from_end(1).map_or(0, |state| state.value);
                Ok(last.with_value(last.value + before))
            },
        )
    }
}

/// History generator yielding the length of the timeline it observes.
pub(crate) enum Depth {}
pub(crate) type Depthometer = Tally<Depth>;

impl Rules for Depth {
    fn simpack() -> Simpack<Depthometer> {
        Simpack::new("depthometer").with_history_step_generator(
            |browser: HistoryBrowser<Depthometer>, _: StepProfile<Depthometer>| {
                std::iter::repeat_with(move || -> StepResult<Depthometer> {
                    let len = i64::try_from(browser.len()).map_err(StepError::failed)?;
                    Ok(browser.last_state().with_value(len))
                })
            },
        )
    }
}

/// Counts down by one and ends the world instead of going below zero.
pub(crate) enum Down {}
pub(crate) type Countdown = Tally<Down>;

impl Rules for Down {
    fn simpack() -> Simpack<Countdown> {
        Simpack::new("countdown").with_step(|state: &Countdown, _: &StepProfile<Countdown>| {
            if state.value == 0 {
                return Err(StepError::WorldEnded);
            }
            Ok(state.advanced(-1))
        })
    }
}

/// Adds one per step and fails once the value reaches 3.
pub(crate) enum Fault {}
pub(crate) type Faulty = Tally<Fault>;

impl Rules for Fault {
    fn simpack() -> Simpack<Faulty> {
        Simpack::new("faulty").with_step(|state: &Faulty, _: &StepProfile<Faulty>| {
            if state.value >= 3 {
                return Err(StepError::failed(io::Error::other("overheated")));
            }
            Ok(state.advanced(1))
        })
    }
}

/// Declares both flavors, which no grokker accepts.
pub(crate) enum Mix {}
pub(crate) type Mixed = Tally<Mix>;

impl Rules for Mix {
    fn simpack() -> Simpack<Mixed> {
        Simpack::new("mixed")
            .with_step(|state: &Mixed, _: &StepProfile<Mixed>| Ok(state.advanced(1)))
            .with_history_step(|browser: &HistoryBrowser<Mixed>, _: &StepProfile<Mixed>| {
                Ok(browser.last_state())
            })
    }
}
