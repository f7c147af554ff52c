//! Ready-made generator bodies.
//!
//! Split into logical submodules:
//!
//! - [`counting`]: `Counter` (bounded) and `Naturals` (infinite)
//! - [`recurrence`]: `Fibonacci`
//! - [`comprehension`]: `(f(x) for x in iterable)`
//! - [`chains`]: scripted multi-yield and `yield from` bodies
//!
//! Every body is a [`Computation`](crate::generators::Computation), so
//! `instantiate::<Counter>(5)` gives a Fresh generator without running any
//! body code.

pub mod chains;
pub mod comprehension;
pub mod counting;
pub mod recurrence;


pub use chains::{first, second, some};
pub use comprehension::{comprehension, Comprehension};
pub use counting::{Counter, Naturals};
pub use recurrence::{Fibonacci, SequenceError};
