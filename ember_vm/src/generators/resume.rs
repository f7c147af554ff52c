//! Resume points and the body contract.
//!
//! A generator body is an explicit state machine: its locals live in the
//! body value itself and its program counter is a [`ResumePoint`] owned by
//! the generator header. Each call to [`Body::resume`] runs from the given
//! point until the body reaches a production point, a delegation point, or
//! its natural end, and reports which one through a [`Transition`].
//!
//! # Example
//!
//! ```
//! use ember_vm::generators::{Body, ResumePoint, Transition};
//! use std::convert::Infallible;
//!
//! /// yield 1; yield 2
//! struct Pair;
//!
//! impl Body for Pair {
//!     type Yield = u32;
//!     type Error = Infallible;
//!
//!     fn resume(&mut self, at: ResumePoint) -> Result<Transition<u32, Infallible>, Infallible> {
//!         Ok(match at.index() {
//!             0 => Transition::yield_at(1, ResumePoint::new(1)),
//!             1 => Transition::yield_at(2, ResumePoint::new(2)),
//!             _ => Transition::Return,
//!         })
//!     }
//! }
//! ```

use std::fmt;

use super::iterator::{BoxedSource, SequenceSource};

/// Maximum number of resume points in a single body (30-bit resume index).
pub const MAX_RESUME_POINTS: u32 = 1 << 30;

// ============================================================================
// Resume Points
// ============================================================================

/// A program location inside a body.
///
/// `ENTRY` is the start of the body; every other index is chosen by the body
/// and names the position just past a production or delegation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResumePoint(u32);

impl ResumePoint {
    /// Start of the body.
    pub const ENTRY: Self = Self(0);

    /// Creates a resume point from a raw index.
    ///
    /// Indices at or above [`MAX_RESUME_POINTS`] are representable here but
    /// rejected by the generator when a body returns them.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[inline(always)]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the following resume point. Saturates at `u32::MAX`.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns true if the generator header can store this point.
    #[inline(always)]
    pub const fn is_in_range(self) -> bool {
        self.0 < MAX_RESUME_POINTS
    }

    /// Returns true if this is the body entry.
    #[inline]
    pub const fn is_entry(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ResumePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

// ============================================================================
// Transitions
// ============================================================================

/// What a body did with one resumption.
pub enum Transition<T, E> {
    /// Reached a production point. Resume at `resume_at` next time.
    Yield {
        /// The produced value.
        value: T,
        /// Where the body continues on the next step.
        resume_at: ResumePoint,
    },
    /// Reached a delegation point. Drain `inner`, then resume at `resume_at`.
    Delegate {
        /// The nested generator whose values are forwarded.
        inner: BoxedSource<T, E>,
        /// Where the body continues once `inner` is exhausted.
        resume_at: ResumePoint,
    },
    /// Control flow reached the end of the body.
    Return,
}

impl<T, E> Transition<T, E> {
    /// Production point helper.
    #[inline]
    pub fn yield_at(value: T, resume_at: ResumePoint) -> Self {
        Self::Yield { value, resume_at }
    }

    /// Delegation point helper. Instantiates the inner generator right away.
    #[inline]
    pub fn delegate<S, F>(inner_factory: F, resume_at: ResumePoint) -> Self
    where
        F: FnOnce() -> S,
        S: SequenceSource<Item = T, Error = E> + 'static,
    {
        Self::Delegate {
            inner: Box::new(inner_factory()),
            resume_at,
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Transition<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yield { value, resume_at } => f
                .debug_struct("Yield")
                .field("value", value)
                .field("resume_at", resume_at)
                .finish(),
            Self::Delegate { inner, resume_at } => f
                .debug_struct("Delegate")
                .field("inner_state", &inner.state())
                .field("resume_at", resume_at)
                .finish(),
            Self::Return => f.write_str("Return"),
        }
    }
}

// ============================================================================
// Body Contract
// ============================================================================

/// A resumable computation body.
///
/// The implementing value holds the body's locals; it is owned exclusively by
/// one generator. `resume` is only ever called by the generator's step
/// operation, with the resume point recorded by the previous transition
/// (or [`ResumePoint::ENTRY`] on the first step).
pub trait Body {
    /// Type of produced values.
    type Yield;
    /// Failure type of the body.
    type Error;

    /// Runs the body from `at` until the next transition.
    fn resume(
        &mut self,
        at: ResumePoint,
    ) -> Result<Transition<Self::Yield, Self::Error>, Self::Error>;
}

/// A body with declared inputs.
///
/// `capture` only stores the parameters; it must not run any body code.
pub trait Computation: Body + Sized {
    /// Declared inputs.
    type Params;

    /// Captures the parameters into fresh locals.
    fn capture(params: Self::Params) -> Self;
}

// ============================================================================
// Tests
// ============================================================================
