//! Counting bodies.
//!
//! | Body       | Computation                               |
//! |------------|-------------------------------------------|
//! | `Counter`  | `i = 0; while i < n { yield i; i += 1 }` |
//! | `Naturals` | `i = 0; loop { yield i; i += 1 }`         |

use std::convert::Infallible;

use crate::generators::{Body, Computation, ResumePoint, Transition};

/// Resume point just past the `yield i` statement.
const AFTER_YIELD: ResumePoint = ResumePoint::new(1);

// =============================================================================
// Counter
// =============================================================================

/// Yields `0, 1, …, n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    i: u64,
    n: u64,
}

impl Counter {
    /// Current value of the loop counter.
    #[inline]
    pub fn current(&self) -> u64 {
        self.i
    }

    /// The captured bound.
    #[inline]
    pub fn bound(&self) -> u64 {
        self.n
    }
}

impl Body for Counter {
    type Yield = u64;
    type Error = Infallible;

    #[inline]
    fn resume(&mut self, at: ResumePoint) -> Result<Transition<u64, Infallible>, Infallible> {
        if at == AFTER_YIELD {
            self.i += 1;
        }
        Ok(if self.i < self.n {
            Transition::yield_at(self.i, AFTER_YIELD)
        } else {
            Transition::Return
        })
    }
}

impl Computation for Counter {
    type Params = u64;

    #[inline]
    fn capture(n: u64) -> Self {
        Self { i: 0, n }
    }
}

// =============================================================================
// Naturals
// =============================================================================

/// Yields `0, 1, 2, …` forever. Wraps at `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Naturals {
    i: u64,
}

impl Body for Naturals {
    type Yield = u64;
    type Error = Infallible;

    #[inline]
    fn resume(&mut self, at: ResumePoint) -> Result<Transition<u64, Infallible>, Infallible> {
        if at == AFTER_YIELD {
            self.i = self.i.wrapping_add(1);
        }
        Ok(Transition::yield_at(self.i, AFTER_YIELD))
    }
}

impl Computation for Naturals {
    type Params = ();

    #[inline]
    fn capture((): ()) -> Self {
        Self::default()
    }
}

// =============================================================================
// Tests
// =============================================================================
