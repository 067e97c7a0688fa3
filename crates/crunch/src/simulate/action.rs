/// Control actions an observer can return to a simulation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run and return the states produced so far.
    StopEarly,
}
