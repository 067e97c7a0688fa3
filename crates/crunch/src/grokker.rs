//! Classifying simpacks and normalizing their step functions.
//!
//! A simpack may provide a simple step, a step generator, or both, in either a
//! history-dependent or a history-independent flavor. [`SimpackGrokker`] turns
//! whatever it provides into two uniform operations:
//!
//! - [`SimpackGrokker::step`]: one step, one new state
//! - [`SimpackGrokker::step_generator`]: a lazy sequence of successive states
//!
//! The missing shape is synthesized from the provided one by the [`adapters`].

pub mod adapters;
mod capabilities;
mod error;

pub use capabilities::Capabilities;
pub use error::InvalidSimpack;

use std::fmt;

use simpack_core::{
    Shape, Simpack, State, StepError, StepFunction, StepInput, StepIter, StepKind, StepProfile,
    StepResult,
};

use adapters::{
    history_step_generator_from_simple_step, simple_history_step_from_step_generator,
    simple_step_from_step_generator, step_generator_from_simple_step,
};

/// A classified simpack with a normalized stepping interface.
///
/// Grokking is done once per simpack; see [`GrokkerRegistry`] for the cache.
///
/// [`GrokkerRegistry`]: crate::GrokkerRegistry
pub struct SimpackGrokker<S> {
    simpack: Simpack<S>,
    capabilities: Capabilities,
    default_step_function: StepFunction<S>,
}

impl<S: State> SimpackGrokker<S> {
    /// Classifies a simpack.
    ///
    /// The default step function is the simpack's declared default, or else its
    /// simple step, or else its step generator.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSimpack`] if the simpack mixes history-dependent and
    /// history-independent step functions, provides none, or declares a
    /// default whose history dependence differs from its step functions.
    pub fn new(simpack: Simpack<S>) -> Result<Self, InvalidSimpack> {
        let capabilities = Capabilities::of(&simpack);
        capabilities.validate(simpack.name())?;

        let history_dependent = capabilities.history_dependent();

        let default_step_function = match simpack.default_step_function() {
            Some(function) if function.is_history_dependent() != history_dependent => {
                return Err(InvalidSimpack::DefaultFlavorMismatch {
                    simpack: simpack.name().to_owned(),
                    function: function.name().to_owned(),
                });
            }
            Some(function) => function.clone(),
            None => {
                let native = if history_dependent {
                    simpack.history_step().or(simpack.history_step_generator())
                } else {
                    simpack.step().or(simpack.step_generator())
                };
                native
                    .cloned()
                    .ok_or_else(|| InvalidSimpack::NoStepFunction {
                        simpack: simpack.name().to_owned(),
                    })?
            }
        };

        Ok(Self {
            simpack,
            capabilities,
            default_step_function,
        })
    }

    /// Takes one step with the profile's step function.
    ///
    /// A simple step function is called directly. A generator is started
    /// fresh and its first state is kept, unless the function is one of the
    /// simpack's own and the simpack also provides a native simple step of the
    /// same flavor, in which case that step is called instead.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::InputMismatch`] if the input's flavor differs from
    /// the step function's, [`StepError::WorldEnded`] if the world has ended,
    /// or any failure of the step function itself.
    pub fn step(&self, input: &StepInput<S>, profile: &StepProfile<S>) -> StepResult<S> {
        let function = self.resolve(profile.step_function(), Shape::Simple);

        match (function.kind(), input) {
            (StepKind::Simple(step), StepInput::State(state)) => step(state, profile),
            (StepKind::HistorySimple(step), StepInput::History(browser)) => step(browser, profile),
            (StepKind::Generator(generator), StepInput::State(state)) => {
                simple_step_from_step_generator(generator, state, profile)
            }
            (StepKind::HistoryGenerator(generator), StepInput::History(browser)) => {
                simple_history_step_from_step_generator(generator, browser, profile)
            }
            _ => Err(StepError::input_mismatch(function)),
        }
    }

    /// Starts a lazy sequence of successive states.
    ///
    /// Mirrors [`step`](Self::step): a generator is used directly, and a simple
    /// step is called repeatedly on its own output unless the simpack provides
    /// a native generator counterpart.
    ///
    /// A flavor mismatch between input and step function yields a single
    /// [`StepError::InputMismatch`].
    pub fn step_generator(&self, input: StepInput<S>, profile: &StepProfile<S>) -> StepIter<S> {
        let function = self.resolve(profile.step_function(), Shape::Generator);

        match (function.kind(), input) {
            (StepKind::Generator(generator), StepInput::State(state)) => {
                generator(state, profile.clone())
            }
            (StepKind::HistoryGenerator(generator), StepInput::History(browser)) => {
                generator(browser, profile.clone())
            }
            (StepKind::Simple(step), StepInput::State(state)) => {
                step_generator_from_simple_step(step.clone(), state, profile.clone())
            }
            (StepKind::HistorySimple(step), StepInput::History(browser)) => {
                history_step_generator_from_simple_step(step.clone(), browser, profile.clone())
            }
            _ => Box::new(std::iter::once(Err(StepError::input_mismatch(function)))),
        }
    }

    /// Picks the native function of `shape` standing in for `function`.
    fn resolve<'a>(&'a self, function: &'a StepFunction<S>, shape: Shape) -> &'a StepFunction<S> {
        if function.shape() == shape {
            return function;
        }

        let (simple, generator) = if function.is_history_dependent() {
            (self.simpack.history_step(), self.simpack.history_step_generator())
        } else {
            (self.simpack.step(), self.simpack.step_generator())
        };

        let (own, counterpart) = match shape {
            Shape::Simple => (generator, simple),
            Shape::Generator => (simple, generator),
        };

        match (own, counterpart) {
            (Some(own), Some(counterpart)) if own == function => counterpart,
            _ => function,
        }
    }
}

impl<S> SimpackGrokker<S> {
    #[must_use]
    pub fn simpack(&self) -> &Simpack<S> {
        &self.simpack
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns `true` if the simpack's steps consult history.
    #[must_use]
    pub fn history_dependent(&self) -> bool {
        self.capabilities.history_dependent()
    }

    /// Returns the step function used when a caller names none.
    #[must_use]
    pub fn default_step_function(&self) -> &StepFunction<S> {
        &self.default_step_function
    }
}

impl<S> fmt::Debug for SimpackGrokker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpackGrokker")
            .field("simpack", &self.simpack.name())
            .field("capabilities", &self.capabilities)
            .field("default_step_function", &self.default_step_function)
            .finish()
    }
}
