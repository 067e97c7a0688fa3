//! Step profiles: which step function to call, and with what arguments.

mod args;
mod error;

pub use args::{Arg, StepArgs};
pub use error::{ArgPosition, StepProfileError};

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    sync::Arc,
};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::StepFunction;

/// Keyword under which a step function may be passed to
/// [`StepProfile::build_with_default_step_function`].
pub const STEP_FUNCTION_KEYWORD: &str = "step_function";

/// An immutable bundle of a step function and the fixed arguments passed to
/// it on every invocation.
///
/// Profiles are cheap to clone. Two profiles are equal when their step
/// functions and arguments match.
pub struct StepProfile<S> {
    step_function: StepFunction<S>,
    args: Arc<[Value]>,
    kwargs: Arc<BTreeMap<String, Value>>,
}

impl<S> StepProfile<S> {
    /// Creates a profile with no arguments.
    pub fn new(step_function: StepFunction<S>) -> Self {
        Self::with_arguments(step_function, Vec::new(), BTreeMap::new())
    }

    /// Creates a profile with the given positional and keyword arguments.
    pub fn with_arguments(
        step_function: StepFunction<S>,
        args: Vec<Value>,
        kwargs: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            step_function,
            args: args.into(),
            kwargs: Arc::new(kwargs),
        }
    }

    /// Builds a profile from call-style arguments, falling back to `default`.
    ///
    /// The step function is taken from, in order of precedence:
    ///
    /// 1. an existing [`StepProfile`] passed as the only argument, which is
    ///    reused verbatim;
    /// 2. a [`StepFunction`] passed as the first positional argument or under
    ///    the [`STEP_FUNCTION_KEYWORD`] keyword;
    /// 3. `default`.
    ///
    /// All remaining values become the profile's arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`StepProfileError`] if the arguments specify the step
    /// function inconsistently, combine a profile with other arguments, place a
    /// step function or profile anywhere else, or repeat a keyword.
    pub fn build_with_default_step_function(
        default: StepFunction<S>,
        args: StepArgs<S>,
    ) -> Result<Self, StepProfileError> {
        let StepArgs { args, kwargs } = args;

        let mut positional = args.into_iter();
        let mut values = Vec::new();
        let mut positional_function = None;

        match positional.next() {
            Some(Arg::Profile(profile)) => {
                if positional.len() > 0 || !kwargs.is_empty() {
                    return Err(StepProfileError::ProfileWithArguments);
                }
                return Ok(profile);
            }
            Some(Arg::StepFunction(function)) => positional_function = Some(function),
            Some(Arg::Value(value)) => values.push(value),
            None => {}
        }

        for (index, arg) in positional.enumerate() {
            match arg {
                Arg::Value(value) => values.push(value),
                Arg::StepFunction(_) | Arg::Profile(_) => {
                    return Err(StepProfileError::MisplacedStepFunction(
                        ArgPosition::Positional(index + 1),
                    ));
                }
            }
        }

        let mut seen = HashSet::new();
        let mut keyword_function = None;
        let mut keywords = BTreeMap::new();

        for (name, arg) in kwargs {
            if !seen.insert(name.clone()) {
                return Err(StepProfileError::DuplicateKeyword(name));
            }

            match (name == STEP_FUNCTION_KEYWORD, arg) {
                (true, Arg::StepFunction(function)) => keyword_function = Some(function),
                (true, _) => return Err(StepProfileError::NotAStepFunction),
                (false, Arg::Value(value)) => {
                    keywords.insert(name, value);
                }
                (false, Arg::StepFunction(_) | Arg::Profile(_)) => {
                    return Err(StepProfileError::MisplacedStepFunction(
                        ArgPosition::Keyword(name),
                    ));
                }
            }
        }

        let step_function = match (positional_function, keyword_function) {
            (Some(_), Some(_)) => return Err(StepProfileError::ConflictingStepFunction),
            (Some(function), None) | (None, Some(function)) => function,
            (None, None) => default,
        };

        Ok(Self::with_arguments(step_function, values, keywords))
    }

    /// Returns the step function this profile calls.
    #[must_use]
    pub fn step_function(&self) -> &StepFunction<S> {
        &self.step_function
    }

    /// Returns the positional arguments.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Returns the keyword arguments.
    #[must_use]
    pub fn kwargs(&self) -> &BTreeMap<String, Value> {
        &self.kwargs
    }

    /// Returns the positional argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Returns the keyword argument `name`, if present.
    #[must_use]
    pub fn kwarg(&self, name: &str) -> Option<&Value> {
        self.kwargs.get(name)
    }

    /// Deserializes the positional argument at `index`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument does not deserialize into `T`.
    pub fn arg_as<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>, serde_json::Error> {
        self.arg(index).map(T::deserialize).transpose()
    }

    /// Deserializes the keyword argument `name`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument does not deserialize into `T`.
    pub fn kwarg_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, serde_json::Error> {
        self.kwarg(name).map(T::deserialize).transpose()
    }
}

impl<S> Clone for StepProfile<S> {
    fn clone(&self) -> Self {
        Self {
            step_function: self.step_function.clone(),
            args: Arc::clone(&self.args),
            kwargs: Arc::clone(&self.kwargs),
        }
    }
}

impl<S> PartialEq for StepProfile<S> {
    fn eq(&self, other: &Self) -> bool {
        self.step_function == other.step_function
            && self.args == other.args
            && self.kwargs == other.kwargs
    }
}

impl<S> Eq for StepProfile<S> {}

impl<S> fmt::Debug for StepProfile<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepProfile")
            .field("step_function", &self.step_function)
            .field("args", &self.args)
            .field("kwargs", &self.kwargs)
            .finish()
    }
}

/// Renders the profile like a call, e.g. `step(1, by=2)`.
impl<S> fmt::Display for StepProfile<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.step_function)?;

        let args = self.args.iter().map(ToString::to_string);
        let kwargs = self.kwargs.iter().map(|(name, value)| format!("{name}={value}"));
        for (index, rendered) in args.chain(kwargs).enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&rendered)?;
        }

        f.write_str(")")
    }
}
