//! # spire-core
//!
//! Core types, traits, configuration, and error handling for Spire.

pub mod config;
pub mod emitter;
pub mod error;
pub mod store;
pub mod traits;

pub use config::shellexpand;
