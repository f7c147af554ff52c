//! Generator protocol implementation.
//!
//! Generators are stackless: every computation is an explicit state machine
//! whose locals live in a [`Body`] value and whose program counter is a
//! [`ResumePoint`] stored in the generator header.
//!
//! # Architecture
//!
//! - **Tagged State**: 4-byte header encodes status + resume index
//! - **Body Contract**: `resume(at)` runs to the next yield, delegation, or return
//! - **Delegation Links**: `yield from` drains an owned inner generator first
//! - **Iteration Protocol**: `for_each`, `next_or_fail`, and a fused `Iterator`
//! - **Scripts**: hand-written multi-step bodies as inline op tables

mod delegate;
mod iterator;
mod methods;
mod object;
mod resume;
mod script;
mod state;

pub use ember_core::{GeneratorError, GeneratorResult};

pub use delegate::{delegate, widen, DelegationLink, Widened};
pub use iterator::{
    for_each, next_or_fail, BoxedSource, GeneratorIterator, SequenceSource, Step,
};
pub use methods::close;
pub use object::{instantiate, GeneratorObject};
pub use resume::{Body, Computation, ResumePoint, Transition, MAX_RESUME_POINTS};
pub use script::{Script, ScriptBuilder, INLINE_OPS};
pub use state::{GeneratorHeader, GeneratorState};

// ============================================================================
// Tests
// ============================================================================
