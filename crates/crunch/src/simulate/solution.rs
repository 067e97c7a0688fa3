/// Indicates how an eager run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested iterations.
    Complete,

    /// The simpack ended the world before the iterations ran out.
    WorldEnded,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of [`list_simulate`](super::list_simulate).
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// How the run terminated.
    pub status: Status,

    /// Every state of the run, starting with the start state.
    pub states: Vec<S>,

    /// Number of steps taken.
    pub steps: usize,
}

impl<S> Solution<S> {
    /// Returns the last state of the run.
    #[must_use]
    pub fn final_state(&self) -> Option<&S> {
        self.states.last()
    }
}
