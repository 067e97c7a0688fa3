//! Adapters that derive one step shape from the other.
//!
//! Each adapter wraps a native callable of the opposite shape, so deriving a
//! step from a generator never goes back through a derived generator.

use simpack_core::{
    HistoryBrowser, HistoryStepFn, HistoryStepGeneratorFn, SimpleStepFn, State, StepError,
    StepGeneratorFn, StepIter, StepProfile, StepResult,
};

/// Takes one step by starting a fresh generator and keeping its first state.
///
/// The generator is dropped afterwards, so repeated calls are independent.
pub fn simple_step_from_step_generator<S: State>(
    generator: &StepGeneratorFn<S>,
    state: &S,
    profile: &StepProfile<S>,
) -> StepResult<S> {
    first_step(generator(state.clone(), profile.clone()))
}

/// History-dependent version of [`simple_step_from_step_generator`].
pub fn simple_history_step_from_step_generator<S: State>(
    generator: &HistoryStepGeneratorFn<S>,
    browser: &HistoryBrowser<S>,
    profile: &StepProfile<S>,
) -> StepResult<S> {
    first_step(generator(browser.clone(), profile.clone()))
}

fn first_step<S>(mut steps: StepIter<S>) -> StepResult<S> {
    steps.next().unwrap_or(Err(StepError::WorldEnded))
}

/// Generates successive states by calling a simple step on its own output.
///
/// The sequence is infinite unless the step ends the world. It stops after
/// the first error.
pub fn step_generator_from_simple_step<S: State>(
    step: SimpleStepFn<S>,
    state: S,
    profile: StepProfile<S>,
) -> StepIter<S> {
    Box::new(SimpleSteps {
        step,
        current: Some(state),
        profile,
    })
}

/// Generates successive states by calling a history-dependent step.
///
/// Each call sees the browser as it is at that moment; the caller is expected
/// to append every produced state to the browser's tree before pulling again.
pub fn history_step_generator_from_simple_step<S: State>(
    step: HistoryStepFn<S>,
    browser: HistoryBrowser<S>,
    profile: StepProfile<S>,
) -> StepIter<S> {
    Box::new(HistorySimpleSteps {
        step,
        browser,
        profile,
        done: false,
    })
}

struct SimpleSteps<S> {
    step: SimpleStepFn<S>,
    current: Option<S>,
    profile: StepProfile<S>,
}

impl<S: State> Iterator for SimpleSteps<S> {
    type Item = StepResult<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        match (self.step)(&current, &self.profile) {
            Ok(next) => {
                self.current = Some(next.clone());
                Some(Ok(next))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

struct HistorySimpleSteps<S> {
    step: HistoryStepFn<S>,
    browser: HistoryBrowser<S>,
    profile: StepProfile<S>,
    done: bool,
}

impl<S: State> Iterator for HistorySimpleSteps<S> {
    type Item = StepResult<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = (self.step)(&self.browser, &self.profile);
        self.done = result.is_err();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use simpack_core::StepFunction;

    use crate::test_utils::Counter;

    fn profile() -> StepProfile<Counter> {
        StepProfile::new(StepFunction::simple(
            "unused",
            |state: &Counter, _: &StepProfile<Counter>| Ok(state.clone()),
        ))
    }

    #[test]
    fn generator_from_step_chains_outputs() {
        let step: SimpleStepFn<Counter> =
            Arc::new(|state: &Counter, _: &StepProfile<Counter>| Ok(state.advanced(2)));

        let values: Vec<i64> = step_generator_from_simple_step(step, Counter::new(1), profile())
            .take(3)
            .map(|state| state.unwrap().value)
            .collect();

        assert_eq!(values, vec![3, 5, 7]);
    }

    #[test]
    fn generator_from_step_stops_after_error() {
        let step: SimpleStepFn<Counter> = Arc::new(|state: &Counter, _: &StepProfile<Counter>| {
            if state.value >= 2 {
                Err(StepError::WorldEnded)
            } else {
                Ok(state.advanced(1))
            }
        });

        let results: Vec<_> =
            step_generator_from_simple_step(step, Counter::new(0), profile()).collect();

        assert_eq!(results.len(), 3);
        assert!(results[2].as_ref().is_err_and(StepError::is_world_ended));
    }

    #[test]
    fn step_from_generator_restarts_each_call() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&started);
        let generator: StepGeneratorFn<Counter> = Arc::new(
            move |state: Counter, _: StepProfile<Counter>| -> StepIter<Counter> {
                counter.fetch_add(1, Ordering::SeqCst);
                Box::new([1, 2, 4].into_iter().map(move |by| Ok::<_, StepError>(state.advanced(by))))
            },
        );

        let start = Counter::new(10);
        let first = simple_step_from_step_generator(&generator, &start, &profile()).unwrap();
        let second = simple_step_from_step_generator(&generator, &start, &profile()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.value, 11);
        assert_eq!(started.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_generator_ends_the_world() {
        let generator: StepGeneratorFn<Counter> =
            Arc::new(|_: Counter, _: StepProfile<Counter>| -> StepIter<Counter> {
                Box::new(std::iter::empty())
            });

        let result = simple_step_from_step_generator(&generator, &Counter::new(0), &profile());

        assert!(result.is_err_and(|err| err.is_world_ended()));
    }
}
