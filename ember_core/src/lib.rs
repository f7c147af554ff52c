//! # Ember Core
//!
//! Shared definitions for the Ember lazy-sequence engine.
//!
//! - **Error Handling**: step protocol errors and application errors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;

pub use error::{EmberError, EmberResult, GeneratorError, GeneratorResult};

/// Ember engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
