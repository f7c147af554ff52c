//! Bundled computations built on the generator protocol.
//!
//! # Modules
//!
//! - `itertools` - counting, recurrences, comprehensions, scripted chains

pub mod itertools;
