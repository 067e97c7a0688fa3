/// Event emitted by the eager drivers for each state of a run.
///
/// Step 0 is the start state. Steps 1..N follow each successful step.
#[derive(Debug, Clone)]
pub struct Event<S> {
    /// The step number (0 for the start state).
    pub step: usize,

    /// The state produced at this step.
    pub state: S,
}
