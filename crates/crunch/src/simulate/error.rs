use simpack_core::{StepError, StepProfileError};
use thiserror::Error;

use crate::InvalidSimpack;

/// Errors that can occur while setting up or running a simulation.
#[derive(Debug, Error)]
pub enum SimulateError {
    #[error(transparent)]
    InvalidSimpack(#[from] InvalidSimpack),

    #[error("invalid step arguments: {0}")]
    StepProfile(#[from] StepProfileError),

    #[error("step function `{function}` does not match the history dependence of simpack `{simpack}`")]
    IncompatibleStepFunction { function: String, simpack: String },

    #[error(transparent)]
    Step(#[from] StepError),
}
