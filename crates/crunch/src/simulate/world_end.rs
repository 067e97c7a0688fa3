use simpack_core::{StepError, StepIter, StepResult};

/// Ends a step sequence quietly when the world ends.
///
/// A [`StepError::WorldEnded`] item and the exhaustion of the inner sequence
/// both end the guarded sequence. Any other item passes through.
pub(crate) struct WorldEndGuard<S> {
    steps: StepIter<S>,
    ended: bool,
}

impl<S> WorldEndGuard<S> {
    pub(crate) fn new(steps: StepIter<S>) -> Self {
        Self {
            steps,
            ended: false,
        }
    }
}

impl<S> Iterator for WorldEndGuard<S> {
    type Item = StepResult<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ended {
            return None;
        }
        match self.steps.next() {
            None | Some(Err(StepError::WorldEnded)) => {
                self.ended = true;
                None
            }
            item => item,
        }
    }
}
