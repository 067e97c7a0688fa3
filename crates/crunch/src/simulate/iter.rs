use std::{cell::RefCell, fmt, iter::FusedIterator, rc::Rc, sync::Arc};

use simpack_core::{
    HistoryBrowser, State, StepError, StepInput, StepProfile,
    history::{NodeId, SharedTree, Tree},
};
use tracing::{debug, warn};

use super::world_end::WorldEndGuard;
use crate::SimpackGrokker;

/// How a lazy run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All requested iterations were produced.
    Exhausted,

    /// The simpack ended the world, or its generator ran dry.
    WorldEnded,

    /// A step failed; the failure was the last item.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Yielding,
    Done(Termination),
}

/// Records a history-dependent run into its tree.
struct Recorder<S> {
    tree: SharedTree<S>,
    current: NodeId,
    browser: HistoryBrowser<S>,
}

impl<S> Recorder<S> {
    fn new(root_state: S) -> Self {
        let mut tree = Tree::new();
        let root = tree.add_state(root_state, None);
        let path = tree.make_containing_path(root);
        let tree = Rc::new(RefCell::new(tree));
        let browser = HistoryBrowser::new(Rc::clone(&tree), path);

        Self {
            tree,
            current: root,
            browser,
        }
    }

    fn record(&mut self, state: S) {
        self.current = self.tree.borrow_mut().add_state(state, Some(self.current));
    }
}

/// A lazy, bounded sequence of successive states.
///
/// Created by [`iter_simulate`](super::iter_simulate). The first item is the
/// start state, followed by at most `iterations` stepped states. The run ends
/// quietly when the world ends; a failed step is yielded once and ends the
/// run. The step generator is not started until the first stepped state is
/// pulled.
///
/// For history-dependent simpacks every stepped state is recorded in a
/// history tree before it is yielded, so the step functions see it on the
/// next pull.
pub struct IterSimulate<S> {
    grokker: Arc<SimpackGrokker<S>>,
    profile: StepProfile<S>,
    initial: S,
    recorder: Option<Recorder<S>>,
    steps: Option<WorldEndGuard<S>>,
    remaining: usize,
    phase: Phase,
}

impl<S: State> IterSimulate<S> {
    pub(crate) fn new(
        grokker: Arc<SimpackGrokker<S>>,
        profile: StepProfile<S>,
        initial: S,
        iterations: usize,
    ) -> Self {
        let recorder = grokker
            .history_dependent()
            .then(|| Recorder::new(initial.clone()));

        Self {
            grokker,
            profile,
            initial,
            recorder,
            steps: None,
            remaining: iterations,
            phase: Phase::NotStarted,
        }
    }

    fn finish(&mut self, termination: Termination) {
        self.steps = None;
        self.phase = Phase::Done(termination);
    }
}

impl<S> IterSimulate<S> {
    /// Returns how the run ended, or `None` while it is still running.
    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        match self.phase {
            Phase::Done(termination) => Some(termination),
            Phase::NotStarted | Phase::Yielding => None,
        }
    }

    /// Returns the history tree of a history-dependent run.
    #[must_use]
    pub fn tree(&self) -> Option<&SharedTree<S>> {
        self.recorder.as_ref().map(|recorder| &recorder.tree)
    }

    /// Returns the browser the step functions of a history-dependent run see.
    #[must_use]
    pub fn history_browser(&self) -> Option<&HistoryBrowser<S>> {
        self.recorder.as_ref().map(|recorder| &recorder.browser)
    }

    #[must_use]
    pub fn step_profile(&self) -> &StepProfile<S> {
        &self.profile
    }

    /// Returns the start state, with its clock initialized.
    #[must_use]
    pub fn initial_state(&self) -> &S {
        &self.initial
    }
}

impl<S: State> Iterator for IterSimulate<S> {
    type Item = Result<S, StepError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::Done(_) => return None,
            Phase::NotStarted => {
                self.phase = if self.remaining == 0 {
                    Phase::Done(Termination::Exhausted)
                } else {
                    Phase::Yielding
                };
                return Some(Ok(self.initial.clone()));
            }
            Phase::Yielding => {}
        }

        let steps = self.steps.get_or_insert_with(|| {
            let input = match &self.recorder {
                Some(recorder) => StepInput::History(recorder.browser.clone()),
                None => StepInput::State(self.initial.clone()),
            };
            WorldEndGuard::new(self.grokker.step_generator(input, &self.profile))
        });

        match steps.next() {
            Some(Ok(state)) => {
                if let Some(recorder) = &mut self.recorder {
                    recorder.record(state.clone());
                }
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.finish(Termination::Exhausted);
                }
                Some(Ok(state))
            }
            Some(Err(err)) => {
                warn!(
                    simpack = self.grokker.simpack().name(),
                    step_function = self.profile.step_function().name(),
                    error = %err,
                    "step failed"
                );
                self.finish(Termination::Failed);
                Some(Err(err))
            }
            None => {
                debug!(
                    simpack = self.grokker.simpack().name(),
                    remaining = self.remaining,
                    "world ended"
                );
                self.finish(Termination::WorldEnded);
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.phase {
            Phase::NotStarted => (1, self.remaining.checked_add(1)),
            Phase::Yielding => (0, Some(self.remaining)),
            Phase::Done(_) => (0, Some(0)),
        }
    }
}

impl<S: State> FusedIterator for IterSimulate<S> {}

impl<S> fmt::Debug for IterSimulate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterSimulate")
            .field("simpack", &self.grokker.simpack().name())
            .field("profile", &self.profile)
            .field("history_dependent", &self.recorder.is_some())
            .field("remaining", &self.remaining)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
