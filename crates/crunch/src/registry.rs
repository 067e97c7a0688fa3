use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

use simpack_core::State;
use tracing::debug;

use crate::{InvalidSimpack, SimpackGrokker};

/// Caches one [`SimpackGrokker`] per simpack.
///
/// A simpack is identified by the state type it steps. The registry grokks a
/// simpack on first use and returns the same grokker afterwards, until it is
/// [cleared](Self::clear) or dropped. Invalid simpacks are not cached.
#[derive(Default)]
pub struct GrokkerRegistry {
    grokkers: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl GrokkerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the grokker for the simpack of `S`, grokking it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSimpack`] if the simpack of `S` cannot be grokked.
    pub fn grok<S: State>(&mut self) -> Result<Arc<SimpackGrokker<S>>, InvalidSimpack> {
        if let Some(grokker) = self.get::<S>() {
            return Ok(grokker);
        }

        let grokker = Arc::new(SimpackGrokker::new(S::simpack())?);
        debug!(
            simpack = grokker.simpack().name(),
            history_dependent = grokker.history_dependent(),
            default_step_function = grokker.default_step_function().name(),
            "grokked simpack"
        );

        self.grokkers
            .insert(TypeId::of::<S>(), Arc::clone(&grokker) as Arc<dyn Any + Send + Sync>);
        Ok(grokker)
    }

    /// Returns the grokker for the simpack that steps `state`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSimpack`] if that simpack cannot be grokked.
    pub fn create_from_state<S: State>(
        &mut self,
        _state: &S,
    ) -> Result<Arc<SimpackGrokker<S>>, InvalidSimpack> {
        self.grok::<S>()
    }

    /// Returns the cached grokker for `S`, if any.
    #[must_use]
    pub fn get<S: State>(&self) -> Option<Arc<SimpackGrokker<S>>> {
        self.grokkers
            .get(&TypeId::of::<S>())
            .and_then(|grokker| Arc::clone(grokker).downcast::<SimpackGrokker<S>>().ok())
    }

    #[must_use]
    pub fn contains<S: State>(&self) -> bool {
        self.grokkers.contains_key(&TypeId::of::<S>())
    }

    /// Returns the number of cached grokkers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grokkers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grokkers.is_empty()
    }

    /// Drops every cached grokker.
    pub fn clear(&mut self) {
        self.grokkers.clear();
    }
}

impl fmt::Debug for GrokkerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrokkerRegistry")
            .field("len", &self.grokkers.len())
            .finish()
    }
}
