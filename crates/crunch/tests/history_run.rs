//! End-to-end runs of a history-dependent simpack.

use approx::assert_relative_eq;
use simpack_core::{
    HistoryBrowser, Persistent, Simpack, State, StepArgs, StepError, StepProfile, StepResult,
};
use simpack_crunch::{GrokkerRegistry, Status, Termination, iter_simulate, list_simulate};

/// A signal smoothed against its own recent history.
///
/// Each step reads the next input sample and averages it with the last
/// `window - 1` smoothed values. The world ends when the samples run out.
#[derive(Debug, Clone)]
struct Smoother {
    value: f64,
    sample: usize,
    samples: Persistent<Vec<f64>>,
    clock: Option<f64>,
}

impl Smoother {
    fn new(samples: Vec<f64>) -> Self {
        Self {
            value: 0.0,
            sample: 0,
            samples: Persistent::new(samples),
            clock: None,
        }
    }
}

impl State for Smoother {
    fn clock(&self) -> Option<f64> {
        self.clock
    }

    fn set_clock(&mut self, clock: f64) {
        self.clock = Some(clock);
    }

    fn simpack() -> Simpack<Self> {
        Simpack::new("smoother").with_history_step_generator(smooth)
    }
}

fn smooth(
    browser: HistoryBrowser<Smoother>,
    profile: StepProfile<Smoother>,
) -> impl Iterator<Item = StepResult<Smoother>> {
    std::iter::repeat_with(move || -> StepResult<Smoother> {
        let window = profile
            .kwarg_as::<usize>("window")
            .map_err(StepError::failed)?
            .unwrap_or(2)
            .max(1);

        let last = browser.last_state();
        let Some(&sample) = last.samples.get(last.sample) else {
            return Err(StepError::WorldEnded);
        };

        let recent: Vec<f64> = (0..window - 1)
            .map_while(|offset| browser.get_from_end(offset))
            .map(|state| state.value)
            .collect();
        let value = (sample + recent.iter().sum::<f64>()) / (recent.len() + 1) as f64;

        Ok(Smoother {
            value,
            sample: last.sample + 1,
            samples: last.samples.clone(),
            clock: last.clock.map(|clock| clock + 0.5),
        })
    })
}

#[test]
fn smooths_against_recorded_history() {
    let mut registry = GrokkerRegistry::new();
    let start = Smoother::new(vec![4.0, 8.0, 2.0]);

    let states: Vec<Smoother> = iter_simulate(&mut registry, &start, 10, StepArgs::new())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let values: Vec<f64> = states.iter().map(|state| state.value).collect();
    assert_eq!(values.len(), 4);
    assert_relative_eq!(values[1], 2.0);
    assert_relative_eq!(values[2], 5.0);
    assert_relative_eq!(values[3], 3.5);
    assert_relative_eq!(states[3].clock.unwrap(), 1.5);
}

#[test]
fn persistent_samples_are_shared_by_every_state() {
    let mut registry = GrokkerRegistry::new();
    let start = Smoother::new(vec![1.0, 2.0, 3.0]);

    let mut run = iter_simulate(&mut registry, &start, 3, StepArgs::new()).unwrap();
    let states: Vec<Smoother> = run.by_ref().collect::<Result<_, _>>().unwrap();

    assert!(
        states
            .iter()
            .all(|state| Persistent::ptr_eq(&state.samples, &start.samples))
    );

    let tree = run.tree().unwrap().borrow();
    assert_eq!(tree.len(), 4);
    let root = tree.roots()[0];
    assert!(Persistent::ptr_eq(&tree[root].state().samples, &start.samples));
}

#[test]
fn window_comes_from_keyword_argument() {
    let mut registry = GrokkerRegistry::new();
    let start = Smoother::new(vec![6.0, 6.0, 6.0]);
    let args = StepArgs::new().kwarg("window", serde_json::json!(3));

    let solution = list_simulate(&mut registry, &start, 3, args).unwrap();

    let values: Vec<f64> = solution.states.iter().map(|state| state.value).collect();
    assert_relative_eq!(values[1], 3.0);
    assert_relative_eq!(values[2], 3.0);
    assert_relative_eq!(values[3], 4.0);
    assert_eq!(solution.status, Status::Complete);
}

#[test]
fn running_out_of_samples_ends_the_world() {
    let mut registry = GrokkerRegistry::new();
    let start = Smoother::new(vec![1.0]);

    let mut run = iter_simulate(&mut registry, &start, 5, StepArgs::new()).unwrap();

    assert_eq!(run.by_ref().count(), 2);
    assert_eq!(run.termination(), Some(Termination::WorldEnded));
    assert_eq!(run.history_browser().unwrap().len(), 2);
}
