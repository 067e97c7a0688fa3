use std::{fmt, sync::Arc};

use crate::{HistoryBrowser, StepError, StepProfile};

/// The result of a single step: the next state, or why there is none.
pub type StepResult<S> = Result<S, StepError>;

/// A lazy, possibly infinite sequence of successive states.
///
/// A step generator signals the end of the world either by yielding
/// [`StepError::WorldEnded`] or by returning `None`.
pub type StepIter<S> = Box<dyn Iterator<Item = StepResult<S>>>;

/// A history-independent step: `(state, profile) -> next state`.
pub type SimpleStepFn<S> = Arc<dyn Fn(&S, &StepProfile<S>) -> StepResult<S> + Send + Sync>;

/// A history-independent generator: `(state, profile) -> states`.
pub type StepGeneratorFn<S> = Arc<dyn Fn(S, StepProfile<S>) -> StepIter<S> + Send + Sync>;

/// A history-dependent step: `(browser, profile) -> next state`.
pub type HistoryStepFn<S> =
    Arc<dyn Fn(&HistoryBrowser<S>, &StepProfile<S>) -> StepResult<S> + Send + Sync>;

/// A history-dependent generator: `(browser, profile) -> states`.
pub type HistoryStepGeneratorFn<S> =
    Arc<dyn Fn(HistoryBrowser<S>, StepProfile<S>) -> StepIter<S> + Send + Sync>;

/// Whether a step function consults history beyond the previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Reads only the immediately preceding state.
    Independent,

    /// Reads arbitrary past states through a [`HistoryBrowser`].
    HistoryDependent,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Independent => f.write_str("history-independent"),
            Self::HistoryDependent => f.write_str("history-dependent"),
        }
    }
}

/// Whether a step function produces one state per call or a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Simple,
    Generator,
}

/// The callable behind a [`StepFunction`], tagged by shape and flavor.
pub enum StepKind<S> {
    Simple(SimpleStepFn<S>),
    Generator(StepGeneratorFn<S>),
    HistorySimple(HistoryStepFn<S>),
    HistoryGenerator(HistoryStepGeneratorFn<S>),
}

impl<S> StepKind<S> {
    /// Returns `true` if both tags hold the same callable allocation.
    fn same_callable(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Simple(a), Self::Simple(b)) => Arc::ptr_eq(a, b),
            (Self::Generator(a), Self::Generator(b)) => Arc::ptr_eq(a, b),
            (Self::HistorySimple(a), Self::HistorySimple(b)) => Arc::ptr_eq(a, b),
            (Self::HistoryGenerator(a), Self::HistoryGenerator(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<S> Clone for StepKind<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Simple(f) => Self::Simple(Arc::clone(f)),
            Self::Generator(f) => Self::Generator(Arc::clone(f)),
            Self::HistorySimple(f) => Self::HistorySimple(Arc::clone(f)),
            Self::HistoryGenerator(f) => Self::HistoryGenerator(Arc::clone(f)),
        }
    }
}

/// A named step callable.
///
/// The four constructors cover every combination of [`Shape`] and [`Flavor`]
/// a simpack may provide. Step functions compare equal when they share a name
/// and wrap the same callable: clones are equal, while two functions built
/// from separate closures never are, even under the same name.
pub struct StepFunction<S> {
    name: Arc<str>,
    kind: StepKind<S>,
}

impl<S: 'static> StepFunction<S> {
    /// Creates a history-independent step that returns one new state per call.
    pub fn simple<F>(name: impl Into<Arc<str>>, step: F) -> Self
    where
        F: Fn(&S, &StepProfile<S>) -> StepResult<S> + Send + Sync + 'static,
    {
        Self::from_kind(name, StepKind::Simple(Arc::new(step)))
    }

    /// Creates a history-independent generator of successive states.
    pub fn generator<F, I>(name: impl Into<Arc<str>>, generator: F) -> Self
    where
        F: Fn(S, StepProfile<S>) -> I + Send + Sync + 'static,
        I: Iterator<Item = StepResult<S>> + 'static,
    {
        let generator: StepGeneratorFn<S> =
            Arc::new(move |state, profile| Box::new(generator(state, profile)));
        Self::from_kind(name, StepKind::Generator(generator))
    }

    /// Creates a history-dependent step that returns one new state per call.
    pub fn history_simple<F>(name: impl Into<Arc<str>>, step: F) -> Self
    where
        F: Fn(&HistoryBrowser<S>, &StepProfile<S>) -> StepResult<S> + Send + Sync + 'static,
    {
        Self::from_kind(name, StepKind::HistorySimple(Arc::new(step)))
    }

    /// Creates a history-dependent generator of successive states.
    pub fn history_generator<F, I>(name: impl Into<Arc<str>>, generator: F) -> Self
    where
        F: Fn(HistoryBrowser<S>, StepProfile<S>) -> I + Send + Sync + 'static,
        I: Iterator<Item = StepResult<S>> + 'static,
    {
        let generator: HistoryStepGeneratorFn<S> =
            Arc::new(move |browser, profile| Box::new(generator(browser, profile)));
        Self::from_kind(name, StepKind::HistoryGenerator(generator))
    }

    /// Creates a step function from an already tagged callable.
    pub fn from_kind(name: impl Into<Arc<str>>, kind: StepKind<S>) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl<S> StepFunction<S> {
    /// Returns the step function's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tagged callable.
    #[must_use]
    pub fn kind(&self) -> &StepKind<S> {
        &self.kind
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        match self.kind {
            StepKind::Simple(_) | StepKind::HistorySimple(_) => Shape::Simple,
            StepKind::Generator(_) | StepKind::HistoryGenerator(_) => Shape::Generator,
        }
    }

    #[must_use]
    pub fn flavor(&self) -> Flavor {
        match self.kind {
            StepKind::Simple(_) | StepKind::Generator(_) => Flavor::Independent,
            StepKind::HistorySimple(_) | StepKind::HistoryGenerator(_) => {
                Flavor::HistoryDependent
            }
        }
    }

    #[must_use]
    pub fn is_history_dependent(&self) -> bool {
        self.flavor() == Flavor::HistoryDependent
    }
}

impl<S> Clone for StepFunction<S> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            kind: self.kind.clone(),
        }
    }
}

impl<S> PartialEq for StepFunction<S> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind.same_callable(&other.kind)
    }
}

impl<S> Eq for StepFunction<S> {}

impl<S> fmt::Debug for StepFunction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepFunction")
            .field("name", &self.name)
            .field("shape", &self.shape())
            .field("flavor", &self.flavor())
            .finish()
    }
}

impl<S> fmt::Display for StepFunction<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What a step function is driven by: a plain state or a history browser.
pub enum StepInput<S> {
    State(S),
    History(HistoryBrowser<S>),
}

impl<S> StepInput<S> {
    /// Returns the flavor of step function this input is meant for.
    #[must_use]
    pub fn flavor(&self) -> Flavor {
        match self {
            Self::State(_) => Flavor::Independent,
            Self::History(_) => Flavor::HistoryDependent,
        }
    }
}

impl<S: Clone> Clone for StepInput<S> {
    fn clone(&self) -> Self {
        match self {
            Self::State(state) => Self::State(state.clone()),
            Self::History(browser) => Self::History(browser.clone()),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for StepInput<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(state) => f.debug_tuple("State").field(state).finish(),
            Self::History(browser) => f.debug_tuple("History").field(browser).finish(),
        }
    }
}
