use serde_json::Value;

use crate::{StepFunction, StepProfile};

/// One argument handed to [`StepProfile::build_with_default_step_function`].
pub enum Arg<S> {
    /// A plain value passed through to the step function.
    Value(Value),

    /// A step function overriding the default.
    StepFunction(StepFunction<S>),

    /// An existing profile to reuse as-is.
    Profile(StepProfile<S>),
}

impl<S> From<Value> for Arg<S> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl<S> From<StepFunction<S>> for Arg<S> {
    fn from(function: StepFunction<S>) -> Self {
        Self::StepFunction(function)
    }
}

impl<S> From<StepProfile<S>> for Arg<S> {
    fn from(profile: StepProfile<S>) -> Self {
        Self::Profile(profile)
    }
}

/// Call-style positional and keyword arguments for building a step profile.
///
/// ```
/// use serde_json::json;
/// use simpack_core::StepArgs;
///
/// let args: StepArgs<u32> = StepArgs::new().arg(json!(1)).kwarg("by", json!(2));
/// assert!(!args.is_empty());
/// ```
pub struct StepArgs<S> {
    pub(crate) args: Vec<Arg<S>>,
    pub(crate) kwargs: Vec<(String, Arg<S>)>,
}

impl<S> StepArgs<S> {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            kwargs: Vec::new(),
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Arg<S>>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, arg: impl Into<Arg<S>>) -> Self {
        self.kwargs.push((name.into(), arg.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}

impl<S> Default for StepArgs<S> {
    fn default() -> Self {
        Self::new()
    }
}
