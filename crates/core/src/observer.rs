/// Receives simulation events and decides how the run should proceed.
///
/// Observers let callers monitor or steer a simulation without changing the
/// driver's API, enabling logging, early stopping, or custom stop conditions.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// driver-specific action and `None` lets the run continue unchanged.
///
/// Closures implement `Observer`, and `()` is a no-op observer.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
