//! Generator comprehensions.
//!
//! `(f(x) for x in iterable)` becomes `comprehension(iterable, f)`. The
//! iterable is turned into an iterator up front, while `f` only runs when a
//! value is demanded.

use std::convert::Infallible;

use crate::generators::{Body, Computation, GeneratorObject, ResumePoint, Transition};

const AFTER_YIELD: ResumePoint = ResumePoint::new(1);

/// Maps each item of an iterator through `f`, one item per step.
pub struct Comprehension<I, F> {
    iter: I,
    f: F,
}

impl<I, F, T> Body for Comprehension<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> T,
{
    type Yield = T;
    type Error = Infallible;

    #[inline]
    fn resume(&mut self, _at: ResumePoint) -> Result<Transition<T, Infallible>, Infallible> {
        Ok(match self.iter.next() {
            Some(item) => Transition::yield_at((self.f)(item), AFTER_YIELD),
            None => Transition::Return,
        })
    }
}

impl<I, F, T> Computation for Comprehension<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> T,
{
    type Params = (I, F);

    #[inline]
    fn capture((iter, f): (I, F)) -> Self {
        Self { iter, f }
    }
}

/// Builds a Fresh generator for `(f(x) for x in iterable)`.
#[inline]
pub fn comprehension<It, F, T>(
    iterable: It,
    f: F,
) -> GeneratorObject<Comprehension<It::IntoIter, F>>
where
    It: IntoIterator,
    F: FnMut(It::Item) -> T,
{
    GeneratorObject::new(Comprehension::capture((iterable.into_iter(), f)))
}

// =============================================================================
// Tests
// =============================================================================
