//! Scripted sample bodies.
//!
//! ```text
//! some:              first:             second:
//!     yield 1            yield 1            yield from first
//!     yield 2            yield 1            yield 2
//!     yield 3                               yield 2
//! ```

use crate::generators::{GeneratorObject, Script, ScriptBuilder};

/// Three production statements in a row: 1, 2, 3.
pub fn some() -> GeneratorObject<Script<u64>> {
    ScriptBuilder::new().emit(1).emit(2).emit(3).instantiate()
}

/// Yields 1 twice.
pub fn first() -> GeneratorObject<Script<u64>> {
    ScriptBuilder::new().emit(1).emit(1).instantiate()
}

/// Delegates to [`first`], then yields 2 twice.
pub fn second() -> GeneratorObject<Script<u64>> {
    ScriptBuilder::new().delegate(first).emit(2).emit(2).instantiate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{for_each, next_or_fail, Step};
    use ember_core::GeneratorError;

    #[test]
    fn test_some_then_stop() {
        let mut s = some();
        assert_eq!(s.step(), Ok(Step::Produced(1)));
        assert_eq!(s.step(), Ok(Step::Produced(2)));
        assert_eq!(s.step(), Ok(Step::Produced(3)));
        assert_eq!(s.step(), Ok(Step::Exhausted));
    }

    #[test]
    fn test_second_flattens_first() {
        let mut obj = second();
        let mut seen = Vec::new();
        for_each(&mut obj, |v| seen.push(v)).unwrap();
        assert_eq!(seen, vec![1, 1, 2, 2]);
        assert_eq!(next_or_fail(&mut obj), Err(GeneratorError::IllegalResume));
    }
}
