//! Lazy-sequence execution engine for Ember.
//!
//! Values are produced from a stateful computation one at a time, on
//! demand. Each computation is an explicit state machine: its locals live
//! in a body value and its program counter is a resume point, so a paused
//! computation needs no captured call stack.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ GeneratorObject<B: Body>                             │
//! │  ┌──────────┐  ┌────────┐  ┌──────────────────────┐  │
//! │  │ header   │  │ body   │  │ DelegationLink       │  │
//! │  │ state|pc │  │ locals │  │ inner ─► BoxedSource │  │
//! │  └──────────┘  └────────┘  └──────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//!          ▲ step() / for_each() / next_or_fail()
//!       consumer
//! ```
//!
//! # Example
//!
//! ```
//! use ember_vm::generators::{for_each, instantiate};
//! use ember_vm::stdlib::itertools::Fibonacci;
//!
//! let mut fib = instantiate::<Fibonacci>(10);
//! let mut values = Vec::new();
//! for_each(&mut fib, |v| values.push(v)).unwrap();
//! assert_eq!(values, [0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::new_without_default)]

pub mod generators;
pub mod stdlib;

pub use generators::{
    delegate, for_each, instantiate, next_or_fail, Body, Computation, GeneratorObject,
    GeneratorState, ResumePoint, SequenceSource, Step, Transition,
};
