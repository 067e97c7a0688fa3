use std::fmt;

use thiserror::Error;

/// Errors that can occur when building a step profile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepProfileError {
    #[error("step function given both positionally and by keyword")]
    ConflictingStepFunction,

    #[error("an existing step profile cannot be combined with other arguments")]
    ProfileWithArguments,

    #[error("a step function or profile is not allowed as {0}")]
    MisplacedStepFunction(ArgPosition),

    #[error("the `step_function` keyword must hold a step function")]
    NotAStepFunction,

    #[error("keyword `{0}` given more than once")]
    DuplicateKeyword(String),
}

/// Where an offending argument was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgPosition {
    /// Zero-based positional index.
    Positional(usize),
    Keyword(String),
}

impl fmt::Display for ArgPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(index) => write!(f, "positional argument {index}"),
            Self::Keyword(name) => write!(f, "keyword `{name}`"),
        }
    }
}
