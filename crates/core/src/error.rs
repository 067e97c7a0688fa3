use std::error::Error as StdError;

use thiserror::Error;

use crate::{Flavor, StepFunction};

/// Errors a step function or step generator can produce.
#[derive(Debug, Error)]
pub enum StepError {
    /// The simulated world reached a natural end.
    ///
    /// This is a cooperative stop signal, not a failure: simulation drivers
    /// end their sequence quietly when they see it.
    #[error("the world has ended")]
    WorldEnded,

    /// The step function was handed the wrong kind of input.
    #[error("step function `{function}` is {flavor} and cannot take this input")]
    InputMismatch { function: String, flavor: Flavor },

    #[error("step failed: {0}")]
    Failed(#[source] Box<dyn StdError + Send + Sync>),
}

impl StepError {
    /// Wraps a simpack-specific error.
    pub fn failed<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Failed(Box::new(err))
    }

    /// Builds the error for a step function called with mismatched input.
    pub fn input_mismatch<S>(function: &StepFunction<S>) -> Self {
        Self::InputMismatch {
            function: function.name().to_owned(),
            flavor: function.flavor(),
        }
    }

    /// Returns `true` for the cooperative [`StepError::WorldEnded`] signal.
    #[must_use]
    pub fn is_world_ended(&self) -> bool {
        matches!(self, Self::WorldEnded)
    }
}
