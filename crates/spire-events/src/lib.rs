//! # spire-events
//!
//! The event store: binds event pieces to the host emitter, one registration
//! per event name.

mod store;

#[cfg(test)]
mod tests;

pub use store::EventStore;
