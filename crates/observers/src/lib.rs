//! Reusable observers for simpack simulation drivers.
//!
//! This crate provides [`Observer`] implementations and the capability traits
//! they are written against, so an observer works with any driver whose
//! events and actions implement those traits.
//!
//! # Modules
//!
//! - [`traits`]: capability traits ([`HasClock`], [`HasStep`], [`CanStopEarly`])
//! - [`stop`]: observers that end a run ([`StopAtClock`], [`StopAfterSteps`])
//!
//! [`Observer`]: simpack_core::Observer
//! [`HasClock`]: traits::HasClock
//! [`HasStep`]: traits::HasStep
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod stop;
pub mod traits;

pub use stop::{StopAfterSteps, StopAtClock, StopAtClockError};
