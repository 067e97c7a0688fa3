use std::{fmt, sync::Arc};

use crate::{HistoryBrowser, Shape, StepFunction, StepProfile, StepResult};

/// Describes the step functions a simulation package provides.
///
/// A simpack fills any subset of four slots: a simple step, a step generator,
/// and their history-dependent counterparts. The descriptor itself does not
/// validate the combination; grokking it does.
///
/// ```
/// use simpack_core::{Simpack, StepProfile};
///
/// let simpack: Simpack<u64> =
///     Simpack::new("counter").with_step(|state: &u64, _: &StepProfile<u64>| Ok(state + 1));
/// assert!(simpack.step().is_some());
/// assert!(simpack.step_generator().is_none());
/// ```
pub struct Simpack<S> {
    name: Arc<str>,
    step: Option<StepFunction<S>>,
    step_generator: Option<StepFunction<S>>,
    history_step: Option<StepFunction<S>>,
    history_step_generator: Option<StepFunction<S>>,
    default_step_function: Option<StepFunction<S>>,
}

impl<S: 'static> Simpack<S> {
    /// Creates a descriptor with every slot empty.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            step: None,
            step_generator: None,
            history_step: None,
            history_step_generator: None,
            default_step_function: None,
        }
    }

    /// Fills the slot matching the step function's shape and flavor.
    #[must_use]
    pub fn with_step_function(mut self, function: StepFunction<S>) -> Self {
        let slot = match (function.is_history_dependent(), function.shape()) {
            (false, Shape::Simple) => &mut self.step,
            (false, Shape::Generator) => &mut self.step_generator,
            (true, Shape::Simple) => &mut self.history_step,
            (true, Shape::Generator) => &mut self.history_step_generator,
        };
        *slot = Some(function);
        self
    }

    /// Provides a history-independent simple step named `step`.
    #[must_use]
    pub fn with_step<F>(self, step: F) -> Self
    where
        F: Fn(&S, &StepProfile<S>) -> StepResult<S> + Send + Sync + 'static,
    {
        self.with_step_function(StepFunction::simple("step", step))
    }

    /// Provides a history-independent step generator named `step_generator`.
    #[must_use]
    pub fn with_step_generator<F, I>(self, generator: F) -> Self
    where
        F: Fn(S, StepProfile<S>) -> I + Send + Sync + 'static,
        I: Iterator<Item = StepResult<S>> + 'static,
    {
        self.with_step_function(StepFunction::generator("step_generator", generator))
    }

    /// Provides a history-dependent simple step named `history_step`.
    #[must_use]
    pub fn with_history_step<F>(self, step: F) -> Self
    where
        F: Fn(&HistoryBrowser<S>, &StepProfile<S>) -> StepResult<S> + Send + Sync + 'static,
    {
        self.with_step_function(StepFunction::history_simple("history_step", step))
    }

    /// Provides a history-dependent step generator named `history_step_generator`.
    #[must_use]
    pub fn with_history_step_generator<F, I>(self, generator: F) -> Self
    where
        F: Fn(HistoryBrowser<S>, StepProfile<S>) -> I + Send + Sync + 'static,
        I: Iterator<Item = StepResult<S>> + 'static,
    {
        self.with_step_function(StepFunction::history_generator(
            "history_step_generator",
            generator,
        ))
    }

    /// Declares which step function runs when a caller names none.
    #[must_use]
    pub fn with_default_step_function(mut self, function: StepFunction<S>) -> Self {
        self.default_step_function = Some(function);
        self
    }
}

impl<S> Simpack<S> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn step(&self) -> Option<&StepFunction<S>> {
        self.step.as_ref()
    }

    #[must_use]
    pub fn step_generator(&self) -> Option<&StepFunction<S>> {
        self.step_generator.as_ref()
    }

    #[must_use]
    pub fn history_step(&self) -> Option<&StepFunction<S>> {
        self.history_step.as_ref()
    }

    #[must_use]
    pub fn history_step_generator(&self) -> Option<&StepFunction<S>> {
        self.history_step_generator.as_ref()
    }

    /// Returns the explicitly declared default step function, if any.
    #[must_use]
    pub fn default_step_function(&self) -> Option<&StepFunction<S>> {
        self.default_step_function.as_ref()
    }

    /// Iterates over the filled slots.
    pub fn step_functions(&self) -> impl Iterator<Item = &StepFunction<S>> {
        [
            &self.step,
            &self.step_generator,
            &self.history_step,
            &self.history_step_generator,
        ]
        .into_iter()
        .flatten()
    }
}

impl<S> Clone for Simpack<S> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            step: self.step.clone(),
            step_generator: self.step_generator.clone(),
            history_step: self.history_step.clone(),
            history_step_generator: self.history_step_generator.clone(),
            default_step_function: self.default_step_function.clone(),
        }
    }
}

impl<S> fmt::Debug for Simpack<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simpack")
            .field("name", &self.name)
            .field("step_functions", &self.step_functions().collect::<Vec<_>>())
            .field("default_step_function", &self.default_step_function)
            .finish()
    }
}
