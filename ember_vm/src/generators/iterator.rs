//! Iteration protocol for generators.
//!
//! [`SequenceSource`] is the capability every steppable sequence shares;
//! the consumer-facing helpers in this module are written against it so
//! they work the same for plain generators, delegating generators, and
//! type-erased inner generators.
//!
//! # Semantics
//!
//! ```text
//! gen = some()        # yield 1; yield 2; yield 3
//! next_or_fail(gen)   # 1
//! next_or_fail(gen)   # 2
//! next_or_fail(gen)   # 3
//! next_or_fail(gen)   # Err(StopIteration)
//! next_or_fail(gen)   # Err(IllegalResume)
//! ```
//!
//! # Thread Safety
//!
//! A generator is stepped through `&mut`, so at most one caller can drive it
//! at a time. Sharing a generator across threads requires external locking.

use std::iter::FusedIterator;

use ember_core::{GeneratorError, GeneratorResult};

use super::state::GeneratorState;

// ============================================================================
// Step Result
// ============================================================================

/// Outcome of a single successful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<T> {
    /// The body reached a production point.
    Produced(T),
    /// The body reached its end. The generator is now exhausted.
    Exhausted,
}

impl<T> Step<T> {
    /// Returns true if a value was produced.
    #[inline]
    pub fn is_produced(&self) -> bool {
        matches!(self, Self::Produced(_))
    }

    /// Returns true if the sequence ended.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Extracts the produced value, if any.
    #[inline]
    pub fn produced(self) -> Option<T> {
        match self {
            Self::Produced(v) => Some(v),
            Self::Exhausted => None,
        }
    }

    /// Maps the produced value.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Step<U> {
        match self {
            Self::Produced(v) => Step::Produced(f(v)),
            Self::Exhausted => Step::Exhausted,
        }
    }
}

// ============================================================================
// Sequence Source
// ============================================================================

/// Anything that can be asked to run its next step.
pub trait SequenceSource {
    /// Type of produced values.
    type Item;
    /// Failure type of the underlying body.
    type Error;

    /// Runs the computation until it produces a value or ends.
    ///
    /// Fails with [`GeneratorError::IllegalResume`] once exhausted.
    fn step(&mut self) -> GeneratorResult<Step<Self::Item>, Self::Error>;

    /// Current execution state.
    fn state(&self) -> GeneratorState;

    /// Returns true once no further values will ever be produced.
    #[inline]
    fn is_exhausted(&self) -> bool {
        self.state().is_finished()
    }

    /// Borrows this source as a standard iterator.
    #[inline]
    fn iter(&mut self) -> GeneratorIterator<'_, Self>
    where
        Self: Sized,
    {
        GeneratorIterator::new(self)
    }
}

/// Type-erased sequence source, used for delegated inner generators.
pub type BoxedSource<T, E> = Box<dyn SequenceSource<Item = T, Error = E>>;

impl<S: SequenceSource + ?Sized> SequenceSource for Box<S> {
    type Item = S::Item;
    type Error = S::Error;

    #[inline]
    fn step(&mut self) -> GeneratorResult<Step<Self::Item>, Self::Error> {
        (**self).step()
    }

    #[inline]
    fn state(&self) -> GeneratorState {
        (**self).state()
    }
}

// ============================================================================
// Consumer Helpers
// ============================================================================

/// Visits every remaining value in order.
///
/// Returns immediately, without stepping, if the source is already
/// exhausted. Body failures are returned after the values produced before
/// them have been visited.
pub fn for_each<S, F>(source: &mut S, mut visit: F) -> GeneratorResult<(), S::Error>
where
    S: SequenceSource + ?Sized,
    F: FnMut(S::Item),
{
    while !source.is_exhausted() {
        match source.step()? {
            Step::Produced(value) => visit(value),
            Step::Exhausted => break,
        }
    }
    Ok(())
}

/// Steps once and demands a value.
///
/// Exhaustion is reported as [`GeneratorError::StopIteration`], never as a
/// sentinel value.
pub fn next_or_fail<S>(source: &mut S) -> GeneratorResult<S::Item, S::Error>
where
    S: SequenceSource + ?Sized,
{
    match source.step()? {
        Step::Produced(value) => Ok(value),
        Step::Exhausted => Err(GeneratorError::StopIteration),
    }
}

// ============================================================================
// Generator Iterator
// ============================================================================

/// Standard iterator over a borrowed sequence source.
///
/// Does not own the source. Fused: after the source ends or fails, `next`
/// keeps returning `None` without stepping again.
pub struct GeneratorIterator<'a, S: ?Sized> {
    source: &'a mut S,
    done: bool,
}

impl<'a, S: SequenceSource + ?Sized> GeneratorIterator<'a, S> {
    /// Creates a new iterator over a source.
    #[inline]
    pub fn new(source: &'a mut S) -> Self {
        Self {
            source,
            done: false,
        }
    }

    /// Returns a reference to the underlying source.
    #[inline]
    pub fn source(&self) -> &S {
        self.source
    }

    /// Returns true if iteration has finished.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.done || self.source.is_exhausted()
    }
}

impl<S: SequenceSource + ?Sized> Iterator for GeneratorIterator<'_, S> {
    type Item = GeneratorResult<S::Item, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        match self.source.step() {
            Ok(Step::Produced(value)) => Some(Ok(value)),
            Ok(Step::Exhausted) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: SequenceSource + ?Sized> FusedIterator for GeneratorIterator<'_, S> {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Body, GeneratorObject, ResumePoint, Transition};
    use std::convert::Infallible;

    /// yield 1; yield 2; yield 3
    struct Some3;

    impl Body for Some3 {
        type Yield = u8;
        type Error = Infallible;

        fn resume(&mut self, at: ResumePoint) -> Result<Transition<u8, Infallible>, Infallible> {
            Ok(match at.index() {
                i @ 0..=2 => Transition::yield_at(i as u8 + 1, at.next()),
                _ => Transition::Return,
            })
        }
    }

    /// Fails on the second resumption.
    struct FailSecond;

    impl Body for FailSecond {
        type Yield = u8;
        type Error = &'static str;

        fn resume(&mut self, at: ResumePoint) -> Result<Transition<u8, &'static str>, &'static str> {
            if at.is_entry() {
                Ok(Transition::yield_at(1, at.next()))
            } else {
                Err("bad")
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Step Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_step_produced() {
        let step = Step::Produced(42);
        assert!(step.is_produced());
        assert!(!step.is_exhausted());
        assert_eq!(step.produced(), Some(42));
    }

    #[test]
    fn test_step_exhausted() {
        let step: Step<i32> = Step::Exhausted;
        assert!(step.is_exhausted());
        assert_eq!(step.produced(), None);
    }

    #[test]
    fn test_step_map() {
        assert_eq!(Step::Produced(2).map(|v| v * 10), Step::Produced(20));
        assert_eq!(Step::<i32>::Exhausted.map(|v| v * 10), Step::Exhausted);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Consumer Helper Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_next_or_fail_sequence() {
        let mut gen = GeneratorObject::new(Some3);
        assert_eq!(next_or_fail(&mut gen), Ok(1));
        assert_eq!(next_or_fail(&mut gen), Ok(2));
        assert_eq!(next_or_fail(&mut gen), Ok(3));
        assert_eq!(next_or_fail(&mut gen), Err(GeneratorError::StopIteration));
        assert_eq!(next_or_fail(&mut gen), Err(GeneratorError::IllegalResume));
    }

    #[test]
    fn test_for_each_visits_in_order() {
        let mut gen = GeneratorObject::new(Some3);
        let mut seen = Vec::new();
        for_each(&mut gen, |v| seen.push(v)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(gen.is_exhausted());
    }

    #[test]
    fn test_for_each_on_exhausted_is_noop() {
        let mut gen = GeneratorObject::new(Some3);
        for_each(&mut gen, |_| {}).unwrap();

        let mut calls = 0;
        assert_eq!(for_each(&mut gen, |_| calls += 1), Ok(()));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_for_each_propagates_body_error() {
        let mut gen = GeneratorObject::new(FailSecond);
        let mut seen = Vec::new();
        let result = for_each(&mut gen, |v| seen.push(v));
        assert_eq!(result, Err(GeneratorError::Body("bad")));
        assert_eq!(seen, vec![1]);
        assert!(gen.is_exhausted());
    }

    #[test]
    fn test_for_each_on_boxed_source() {
        let mut boxed: BoxedSource<u8, Infallible> = Box::new(GeneratorObject::new(Some3));
        let mut seen = Vec::new();
        for_each(&mut boxed, |v| seen.push(v)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    // ════════════════════════════════════════════════════════════════════════
    // GeneratorIterator Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_iterator_collect() {
        let mut gen = GeneratorObject::new(Some3);
        let values: Result<Vec<_>, _> = gen.iter().collect();
        assert_eq!(values, Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut gen = GeneratorObject::new(Some3);
        let mut iter = gen.iter();
        assert_eq!(iter.by_ref().count(), 3);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        assert!(iter.is_exhausted());
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut gen = GeneratorObject::new(FailSecond);
        let mut iter = gen.iter();
        assert_eq!(iter.next(), Some(Ok(1)));
        assert_eq!(iter.next(), Some(Err(GeneratorError::Body("bad"))));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iterator_partial_then_resume() {
        let mut gen = GeneratorObject::new(Some3);
        let first: Vec<_> = gen.iter().take(1).collect();
        assert_eq!(first, vec![Ok(1)]);
        // A second handle continues where the first stopped.
        let rest: Result<Vec<_>, _> = gen.iter().collect();
        assert_eq!(rest, Ok(vec![2, 3]));
    }
}
