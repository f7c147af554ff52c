//! Generator object implementation.
//!
//! `GeneratorObject` is one paused or running computation. It captures:
//!
//! - Execution state and resume point (via `GeneratorHeader`)
//! - The body, which holds every local the computation needs across pauses
//! - At most one active delegation link to an inner generator
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ GeneratorHeader (4 bytes): state + resume index               │
//! ├───────────────────────────────────────────────────────────────┤
//! │ Body: computation-specific locals                             │
//! ├───────────────────────────────────────────────────────────────┤
//! │ Option<DelegationLink>: inner generator + continuation        │
//! └───────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use ember_core::{GeneratorError, GeneratorResult};
use tracing::{debug, trace};

use super::delegate::DelegationLink;
use super::iterator::{BoxedSource, SequenceSource, Step};
use super::resume::{Body, Computation, ResumePoint, Transition};
use super::state::{GeneratorHeader, GeneratorState};

// ============================================================================
// Generator Object
// ============================================================================

/// A resumable computation driven by [`GeneratorObject::step`].
pub struct GeneratorObject<B: Body> {
    /// Tagged state + resume index.
    header: GeneratorHeader,
    /// Captured locals.
    body: B,
    /// Inner generator currently being drained, if any.
    delegation: Option<DelegationLink<B::Yield, B::Error>>,
}

/// Instantiates a computation from its declared parameters.
///
/// The returned generator is Fresh: no body code has run.
#[inline]
pub fn instantiate<C: Computation>(params: C::Params) -> GeneratorObject<C> {
    GeneratorObject::new(C::capture(params))
}

impl<B: Body> GeneratorObject<B> {
    /// Wraps a body in a Fresh generator.
    #[inline]
    pub fn new(body: B) -> Self {
        Self {
            header: GeneratorHeader::new(),
            body,
            delegation: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // State Accessors
    // ═══════════════════════════════════════════════════════════════════════

    /// Returns the current generator state.
    #[inline(always)]
    pub fn state(&self) -> GeneratorState {
        self.header.state()
    }

    /// Returns where the body continues on the next step.
    #[inline(always)]
    pub fn resume_point(&self) -> ResumePoint {
        self.header.resume_point()
    }

    /// Returns true if the generator can be stepped.
    #[inline(always)]
    pub fn is_resumable(&self) -> bool {
        self.header.is_resumable()
    }

    /// Returns true if the generator is exhausted.
    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.header.is_exhausted()
    }

    /// Returns true if a step is in progress.
    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.header.is_running()
    }

    /// Returns true if an inner generator is being drained.
    #[inline]
    pub fn is_delegating(&self) -> bool {
        self.delegation.is_some()
    }

    /// Returns the captured locals.
    #[inline]
    pub fn body(&self) -> &B {
        &self.body
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Step Protocol
    // ═══════════════════════════════════════════════════════════════════════

    /// Advances the generator to its next production point or its end.
    ///
    /// A failed step is terminal: the body error is returned as
    /// [`GeneratorError::Body`] and the generator is exhausted.
    pub fn step(&mut self) -> GeneratorResult<Step<B::Yield>, B::Error> {
        if self.header.try_start().is_none() {
            return Err(if self.header.is_running() {
                GeneratorError::AlreadyRunning
            } else {
                GeneratorError::IllegalResume
            });
        }

        let result = self.run();
        if let Err(err) = &result {
            debug!(
                kind = err.kind_name(),
                resume = %self.header.resume_point(),
                "generator step failed"
            );
            self.exhaust();
        }
        result
    }

    /// Runs from the current resume point. Header is Running on entry.
    fn run(&mut self) -> GeneratorResult<Step<B::Yield>, B::Error> {
        loop {
            if let Some(link) = self.delegation.as_mut() {
                match link.drain()? {
                    Step::Produced(value) => {
                        let point = self.header.resume_point();
                        self.header.suspend(point);
                        return Ok(Step::Produced(value));
                    }
                    Step::Exhausted => {
                        if let Some(link) = self.delegation.take() {
                            trace!(resume = %link.continuation(), "delegation finished");
                            self.header.set_resume_point(link.continuation());
                        }
                    }
                }
            }

            let at = self.header.resume_point();
            match self.body.resume(at).map_err(GeneratorError::Body)? {
                Transition::Yield { resume_at, .. } | Transition::Delegate { resume_at, .. }
                    if !resume_at.is_in_range() =>
                {
                    return Err(GeneratorError::ResumeOutOfRange {
                        index: resume_at.index(),
                    });
                }
                Transition::Yield { value, resume_at } => {
                    trace!(from = %at, resume = %resume_at, "generator suspended");
                    self.header.suspend(resume_at);
                    return Ok(Step::Produced(value));
                }
                Transition::Delegate { inner, resume_at } => {
                    self.attach_delegation(inner, resume_at);
                }
                Transition::Return => {
                    trace!(from = %at, "generator returned");
                    self.exhaust();
                    return Ok(Step::Exhausted);
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // State Transitions
    // ═══════════════════════════════════════════════════════════════════════

    /// Installs a delegation link. The continuation becomes the resume point.
    ///
    /// An inner generator that is already exhausted installs nothing.
    pub(crate) fn attach_delegation(
        &mut self,
        inner: BoxedSource<B::Yield, B::Error>,
        continuation: ResumePoint,
    ) {
        debug_assert!(self.delegation.is_none());
        self.header.set_resume_point(continuation);
        self.delegation = DelegationLink::open(inner, continuation);
        if let Some(link) = &self.delegation {
            trace!(
                resume = %continuation,
                inner = ?link.inner_state(),
                "delegation started"
            );
        }
    }

    /// Marks the generator exhausted and drops any delegation link.
    #[inline]
    pub(crate) fn exhaust(&mut self) {
        self.delegation = None;
        self.header.exhaust();
    }
}

impl<B: Body> SequenceSource for GeneratorObject<B> {
    type Item = B::Yield;
    type Error = B::Error;

    #[inline]
    fn step(&mut self) -> GeneratorResult<Step<Self::Item>, Self::Error> {
        GeneratorObject::step(self)
    }

    #[inline]
    fn state(&self) -> GeneratorState {
        self.header.state()
    }
}

impl<B: Body> fmt::Debug for GeneratorObject<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorObject")
            .field("state", &self.state())
            .field("resume_index", &self.resume_point().index())
            .field("delegating", &self.is_delegating())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
