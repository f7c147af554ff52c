//! Delegation chains (`yield from`).
//!
//! When an outer body reaches a delegation point, the outer generator opens
//! a [`DelegationLink`] that owns the inner generator and remembers where
//! the outer body continues. Every step of the outer generator first drains
//! the link:
//!
//! ```text
//! step(outer)
//!   ├─ link active? ── step(inner) ── Produced(v) ──> Produced(v)
//!   │                             └─ Exhausted  ──> drop link, fall through
//!   └─ resume outer body at its resume point
//! ```
//!
//! The fall-through happens inside the same outer step, so an inner
//! generator that produces nothing costs the consumer no extra step.

use std::convert::Infallible;

use ember_core::{GeneratorError, GeneratorResult};

use super::iterator::{BoxedSource, SequenceSource, Step};
use super::object::GeneratorObject;
use super::resume::{Body, ResumePoint};
use super::state::GeneratorState;

// ============================================================================
// Delegation Link
// ============================================================================

/// An outer generator's active delegation to an inner generator.
pub struct DelegationLink<T, E> {
    /// The inner generator, owned for the duration of the delegation.
    inner: BoxedSource<T, E>,
    /// Where the outer body continues once `inner` is exhausted.
    continuation: ResumePoint,
}

impl<T, E> DelegationLink<T, E> {
    /// Opens a link, or returns `None` if the inner generator is already
    /// exhausted and there is nothing to drain.
    #[inline]
    pub fn open(inner: BoxedSource<T, E>, continuation: ResumePoint) -> Option<Self> {
        if inner.is_exhausted() {
            return None;
        }
        Some(Self {
            inner,
            continuation,
        })
    }

    /// Steps the inner generator once. Inner errors are returned unchanged.
    #[inline]
    pub fn drain(&mut self) -> GeneratorResult<Step<T>, E> {
        self.inner.step()
    }

    /// Returns where the outer body continues.
    #[inline]
    pub fn continuation(&self) -> ResumePoint {
        self.continuation
    }

    /// Returns the inner generator's state.
    #[inline]
    pub fn inner_state(&self) -> GeneratorState {
        self.inner.state()
    }
}

// ============================================================================
// Delegation Entry Point
// ============================================================================

/// Redirects `outer` to drain a freshly instantiated inner generator.
///
/// The outer body continues at its current resume point once the inner
/// generator is exhausted.
///
/// # Errors
///
/// - [`GeneratorError::IllegalResume`] if `outer` is exhausted
/// - [`GeneratorError::AlreadyRunning`] if `outer` is mid-step
/// - [`GeneratorError::DelegationActive`] if `outer` is already delegating
pub fn delegate<B, S, F>(
    outer: &mut GeneratorObject<B>,
    inner_factory: F,
) -> GeneratorResult<(), B::Error>
where
    B: Body,
    F: FnOnce() -> S,
    S: SequenceSource<Item = B::Yield, Error = B::Error> + 'static,
{
    match outer.state() {
        GeneratorState::Exhausted => return Err(GeneratorError::IllegalResume),
        GeneratorState::Running => return Err(GeneratorError::AlreadyRunning),
        GeneratorState::Fresh | GeneratorState::Suspended => {}
    }
    if outer.is_delegating() {
        return Err(GeneratorError::DelegationActive);
    }

    let continuation = outer.resume_point();
    outer.attach_delegation(Box::new(inner_factory()), continuation);
    Ok(())
}

// ============================================================================
// Error Widening
// ============================================================================

/// Adapts an infallible source so it can be delegated to from a fallible body.
pub struct Widened<S, E> {
    source: S,
    _error: std::marker::PhantomData<fn() -> E>,
}

/// Wraps an infallible source for use where a body error type `E` is expected.
#[inline]
pub fn widen<S, E>(source: S) -> Widened<S, E>
where
    S: SequenceSource<Error = Infallible>,
{
    Widened {
        source,
        _error: std::marker::PhantomData,
    }
}

impl<S, E> SequenceSource for Widened<S, E>
where
    S: SequenceSource<Error = Infallible>,
{
    type Item = S::Item;
    type Error = E;

    #[inline]
    fn step(&mut self) -> GeneratorResult<Step<Self::Item>, E> {
        self.source.step().map_err(GeneratorError::widen)
    }

    #[inline]
    fn state(&self) -> GeneratorState {
        self.source.state()
    }
}

// ============================================================================
// Tests
// ============================================================================
