//! Pairwise recurrences.
//!
//! ```text
//! fibonacci(n):
//!     (a, b) = (0, 1)
//!     repeat n times:
//!         yield a
//!         (a, b) = (b, a + b)
//! ```
//!
//! The accumulator pair and the loop counter are the captured locals.

use thiserror::Error;

use crate::generators::{Body, Computation, ResumePoint, Transition};

const AFTER_YIELD: ResumePoint = ResumePoint::new(1);

/// Failures raised by numeric sequence bodies.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// The next term does not fit in `u64`.
    #[error("OverflowError: term {index} of the sequence exceeds u64")]
    Overflow {
        /// Zero-based index of the term that overflowed.
        index: u64,
    },
}

/// Yields the first `n` Fibonacci numbers.
///
/// The term after the one just produced is held as `None` once it no
/// longer fits, and the body fails only when that term is demanded. The 94
/// terms `F(0)..=F(93)` fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fibonacci {
    a: u64,
    b: Option<u64>,
    taken: u64,
    n: u64,
}

impl Fibonacci {
    /// Returns the `(a, b)` accumulator pair. `b` is `None` past `u64`.
    #[inline]
    pub fn pair(&self) -> (u64, Option<u64>) {
        (self.a, self.b)
    }
}

impl Body for Fibonacci {
    type Yield = u64;
    type Error = SequenceError;

    fn resume(&mut self, at: ResumePoint) -> Result<Transition<u64, SequenceError>, SequenceError> {
        if at == AFTER_YIELD {
            self.taken += 1;
            if self.taken >= self.n {
                return Ok(Transition::Return);
            }
            let next = self.b.ok_or(SequenceError::Overflow { index: self.taken })?;
            (self.a, self.b) = (next, self.a.checked_add(next));
        } else if self.n == 0 {
            return Ok(Transition::Return);
        }
        Ok(Transition::yield_at(self.a, AFTER_YIELD))
    }
}

impl Computation for Fibonacci {
    type Params = u64;

    #[inline]
    fn capture(n: u64) -> Self {
        Self {
            a: 0,
            b: Some(1),
            taken: 0,
            n,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{instantiate, GeneratorState, SequenceSource, Step};
    use ember_core::GeneratorError;

    #[test]
    fn test_first_ten() {
        let mut fib = instantiate::<Fibonacci>(10);
        let values: Result<Vec<_>, _> = fib.iter().collect();
        assert_eq!(values, Ok(vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]));
    }

    #[test]
    fn test_zero_terms() {
        let mut fib = instantiate::<Fibonacci>(0);
        assert_eq!(fib.step(), Ok(Step::Exhausted));
    }

    #[test]
    fn test_pair_advances() {
        let mut fib = instantiate::<Fibonacci>(10);
        assert_eq!(fib.body().pair(), (0, Some(1)));
        fib.step().unwrap();
        assert_eq!(fib.body().pair(), (0, Some(1)));
        fib.step().unwrap();
        assert_eq!(fib.body().pair(), (1, Some(1)));
        fib.step().unwrap();
        assert_eq!(fib.body().pair(), (1, Some(2)));
    }

    #[test]
    fn test_largest_representable_terms() {
        let mut fib = instantiate::<Fibonacci>(94);
        let values: Vec<u64> = fib.iter().map(Result::unwrap).collect();
        assert_eq!(values.len(), 94);
        assert_eq!(values[92], 7_540_113_804_746_346_429);
        assert_eq!(values[93], 12_200_160_415_121_876_738);
        assert_eq!(fib.body().pair(), (12_200_160_415_121_876_738, None));
        assert_eq!(fib.state(), GeneratorState::Exhausted);
    }

    #[test]
    fn test_overflow_is_terminal() {
        let mut fib = instantiate::<Fibonacci>(100);
        let mut last = Ok(Step::Exhausted);
        for _ in 0..95 {
            last = fib.step();
            if last.is_err() {
                break;
            }
        }
        assert_eq!(
            last,
            Err(GeneratorError::Body(SequenceError::Overflow { index: 94 }))
        );
        assert_eq!(fib.state(), GeneratorState::Exhausted);
        assert_eq!(fib.step(), Err(GeneratorError::IllegalResume));
    }
}
