//! Early termination (`close`).
//!
//! A consumer that stops iterating can simply drop the generator. `close`
//! exists for consumers that keep the handle around and want later steps to
//! fail loudly instead of resuming:
//!
//! ```text
//! gen = counter(5)
//! next_or_fail(gen)   # 0
//! close(gen)          # Ok, now exhausted; inner generators dropped
//! step(gen)           # Err(IllegalResume)
//! close(gen)          # Ok, closing twice is a no-op
//! ```

use ember_core::{GeneratorError, GeneratorResult};
use tracing::debug;

use super::object::GeneratorObject;
use super::resume::Body;
use super::state::GeneratorState;

/// Closes a generator, making it exhausted.
///
/// Any active delegation link is dropped along with its inner generator.
/// No body code runs.
///
/// # Errors
///
/// [`GeneratorError::AlreadyRunning`] if the generator is mid-step.
pub fn close<B: Body>(generator: &mut GeneratorObject<B>) -> GeneratorResult<(), B::Error> {
    match generator.state() {
        GeneratorState::Exhausted => Ok(()),
        GeneratorState::Running => Err(GeneratorError::AlreadyRunning),
        state @ (GeneratorState::Fresh | GeneratorState::Suspended) => {
            debug!(
                %state,
                resume = %generator.resume_point(),
                delegating = generator.is_delegating(),
                "closing generator"
            );
            generator.exhaust();
            Ok(())
        }
    }
}

impl<B: Body> GeneratorObject<B> {
    /// Closes this generator. See [`close`].
    #[inline]
    pub fn close(&mut self) -> GeneratorResult<(), B::Error> {
        close(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
