//! Scripted generator bodies.
//!
//! A [`Script`] is a hand-written multi-step body compiled into an explicit
//! op table. The resume point is the index of the next op, so a body with
//! several production statements in a row resumes right after whichever one
//! produced last.
//!
//! ```text
//! second:                  ScriptBuilder::new()
//!     yield from first         .delegate(first)
//!     yield 2                  .emit(2)
//!     yield 2                  .emit(2)
//! ```
//!
//! Small scripts (≤ 8 ops) keep their op table inline with zero allocation.

use std::convert::Infallible;
use std::fmt;

use smallvec::SmallVec;

use super::iterator::{BoxedSource, SequenceSource};
use super::object::GeneratorObject;
use super::resume::{Body, ResumePoint, Transition};

/// Maximum inline ops before spilling to heap.
pub const INLINE_OPS: usize = 8;

type Effect<E> = Box<dyn FnOnce() -> Result<(), E>>;
type Factory<T, E> = Box<dyn FnOnce() -> BoxedSource<T, E>>;

// ============================================================================
// Script Ops
// ============================================================================

/// One statement of a script. Each op runs at most once.
enum ScriptOp<T, E> {
    /// Production point.
    Emit(Option<T>),
    /// Side effect; a failure ends the generator.
    Effect(Option<Effect<E>>),
    /// Delegation point.
    Delegate(Option<Factory<T, E>>),
}

impl<T, E> ScriptOp<T, E> {
    fn name(&self) -> &'static str {
        match self {
            Self::Emit(_) => "emit",
            Self::Effect(_) => "effect",
            Self::Delegate(_) => "delegate",
        }
    }
}

// ============================================================================
// Script
// ============================================================================

/// A body made of a fixed list of ops.
pub struct Script<T, E = Infallible> {
    ops: SmallVec<[ScriptOp<T, E>; INLINE_OPS]>,
}

impl<T, E> Script<T, E> {
    /// Returns the number of ops.
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if the script has no ops.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns true if the op table lives on the heap.
    #[inline]
    pub fn spilled(&self) -> bool {
        self.ops.spilled()
    }
}

impl<T, E> Body for Script<T, E> {
    type Yield = T;
    type Error = E;

    fn resume(&mut self, at: ResumePoint) -> Result<Transition<T, E>, E> {
        let mut pc = at.index() as usize;
        while let Some(op) = self.ops.get_mut(pc) {
            pc += 1;
            let resume_at = ResumePoint::new(pc as u32);
            match op {
                ScriptOp::Emit(slot) => {
                    if let Some(value) = slot.take() {
                        return Ok(Transition::yield_at(value, resume_at));
                    }
                }
                ScriptOp::Effect(effect) => {
                    if let Some(effect) = effect.take() {
                        effect()?;
                    }
                }
                ScriptOp::Delegate(factory) => {
                    if let Some(factory) = factory.take() {
                        return Ok(Transition::Delegate {
                            inner: factory(),
                            resume_at,
                        });
                    }
                }
            }
        }
        Ok(Transition::Return)
    }
}

impl<T, E> fmt::Debug for Script<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.ops.iter().map(ScriptOp::name))
            .finish()
    }
}

// ============================================================================
// Script Builder
// ============================================================================

/// Builds a [`Script`] op by op.
pub struct ScriptBuilder<T, E = Infallible> {
    ops: SmallVec<[ScriptOp<T, E>; INLINE_OPS]>,
}

impl<T: 'static, E: 'static> ScriptBuilder<T, E> {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            ops: SmallVec::new(),
        }
    }

    /// Appends a production point.
    #[must_use]
    pub fn emit(mut self, value: T) -> Self {
        self.ops.push(ScriptOp::Emit(Some(value)));
        self
    }

    /// Appends one production point per value.
    #[must_use]
    pub fn emit_all<I: IntoIterator<Item = T>>(mut self, values: I) -> Self {
        self.ops
            .extend(values.into_iter().map(|v| ScriptOp::Emit(Some(v))));
        self
    }

    /// Appends a side effect, run when execution reaches it.
    #[must_use]
    pub fn effect<F>(mut self, effect: F) -> Self
    where
        F: FnOnce() -> Result<(), E> + 'static,
    {
        self.ops.push(ScriptOp::Effect(Some(Box::new(effect))));
        self
    }

    /// Appends a delegation point. `inner_factory` runs when execution
    /// reaches it, not before.
    #[must_use]
    pub fn delegate<S, F>(mut self, inner_factory: F) -> Self
    where
        F: FnOnce() -> S + 'static,
        S: SequenceSource<Item = T, Error = E> + 'static,
    {
        let factory: Factory<T, E> =
            Box::new(move || -> BoxedSource<T, E> { Box::new(inner_factory()) });
        self.ops.push(ScriptOp::Delegate(Some(factory)));
        self
    }

    /// Finishes the script.
    #[inline]
    pub fn build(self) -> Script<T, E> {
        Script { ops: self.ops }
    }

    /// Finishes the script and wraps it in a Fresh generator.
    #[inline]
    pub fn instantiate(self) -> GeneratorObject<Script<T, E>> {
        GeneratorObject::new(self.build())
    }
}

impl<T: 'static, E: 'static> Default for ScriptBuilder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{for_each, GeneratorState, Step};
    use ember_core::GeneratorError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_three_sequential_emits() {
        let mut generator = ScriptBuilder::<i32>::new().emit(1).emit(2).emit(3).instantiate();
        assert_eq!(generator.step(), Ok(Step::Produced(1)));
        assert_eq!(generator.resume_point(), ResumePoint::new(1));
        assert_eq!(generator.step(), Ok(Step::Produced(2)));
        assert_eq!(generator.resume_point(), ResumePoint::new(2));
        assert_eq!(generator.step(), Ok(Step::Produced(3)));
        assert_eq!(generator.step(), Ok(Step::Exhausted));
        assert_eq!(generator.step(), Err(GeneratorError::IllegalResume));
    }

    #[test]
    fn test_empty_script_exhausts_immediately() {
        let mut generator = ScriptBuilder::<i32>::new().instantiate();
        assert_eq!(generator.step(), Ok(Step::Exhausted));
    }

    #[test]
    fn test_effects_interleave_with_steps() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());
        let mut generator = ScriptBuilder::<&str>::new()
            .effect(move || {
                a.borrow_mut().push("start");
                Ok(())
            })
            .emit("one")
            .effect(move || {
                b.borrow_mut().push("middle");
                Ok(())
            })
            .emit("two")
            .instantiate();

        assert!(log.borrow().is_empty());
        assert_eq!(generator.step(), Ok(Step::Produced("one")));
        assert_eq!(*log.borrow(), vec!["start"]);
        assert_eq!(generator.step(), Ok(Step::Produced("two")));
        assert_eq!(*log.borrow(), vec!["start", "middle"]);
        assert_eq!(generator.step(), Ok(Step::Exhausted));
        assert_eq!(*log.borrow(), vec!["start", "middle"]);
    }

    #[test]
    fn test_failed_effect_is_terminal() {
        let mut generator = ScriptBuilder::<i32, String>::new()
            .emit(1)
            .effect(|| Err("disk on fire".to_string()))
            .emit(2)
            .instantiate();

        assert_eq!(generator.step(), Ok(Step::Produced(1)));
        assert_eq!(
            generator.step(),
            Err(GeneratorError::Body("disk on fire".to_string()))
        );
        assert_eq!(generator.state(), GeneratorState::Exhausted);
        assert_eq!(generator.step(), Err(GeneratorError::IllegalResume));
    }

    #[test]
    fn test_delegate_factory_is_lazy() {
        let built = Rc::new(RefCell::new(false));
        let flag = built.clone();
        let mut generator = ScriptBuilder::<i32>::new()
            .emit(0)
            .delegate(move || {
                *flag.borrow_mut() = true;
                ScriptBuilder::<i32>::new().emit(1).emit(1).instantiate()
            })
            .emit(2)
            .instantiate();

        assert_eq!(generator.step(), Ok(Step::Produced(0)));
        assert!(!*built.borrow());
        assert_eq!(generator.step(), Ok(Step::Produced(1)));
        assert!(*built.borrow());

        let mut rest = Vec::new();
        for_each(&mut generator, |v| rest.push(v)).unwrap();
        assert_eq!(rest, vec![1, 2]);
    }

    #[test]
    fn test_inline_then_spilled() {
        let small = ScriptBuilder::<u8>::new().emit_all(0..8).build();
        assert_eq!(small.len(), 8);
        assert!(!small.spilled());

        let large = ScriptBuilder::<u8>::new().emit_all(0..9).build();
        assert_eq!(large.len(), 9);
        assert!(large.spilled());
    }

    #[test]
    fn test_debug_lists_op_names() {
        let script = ScriptBuilder::<u8>::new()
            .emit(1)
            .effect(|| Ok(()))
            .delegate(|| ScriptBuilder::<u8>::new().instantiate())
            .build();
        assert_eq!(format!("{:?}", script), r#"["emit", "effect", "delegate"]"#);
    }
}
