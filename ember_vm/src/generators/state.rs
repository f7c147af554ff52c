//! Generator state management.
//!
//! `GeneratorHeader` packs both the generator status AND its resume index
//! into a single `u32`, so a status check and the dispatch target come from
//! one load.
//!
//! # Encoding
//!
//! ```text
//! Bits 0-1:  State (Fresh=0, Running=1, Suspended=2, Exhausted=3)
//! Bits 2-31: Resume index (production point ID, max 2^30 - 1)
//! ```
//!
//! Generators are stepped through `&mut`, so the header is a plain integer:
//! exclusive access is already guaranteed by the borrow.

use std::fmt;

use super::resume::ResumePoint;

// ============================================================================
// Generator State
// ============================================================================

/// Generator execution state.
///
/// Packed into 2 bits for single-instruction comparison.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorState {
    /// Instantiated but never stepped; no body code has run.
    #[default]
    Fresh = 0,
    /// Inside a step (reentry check).
    Running = 1,
    /// Paused at a production point.
    Suspended = 2,
    /// Finished, failed, or closed. Final.
    Exhausted = 3,
}

impl GeneratorState {
    /// Number of bits used to encode state.
    pub const BITS: u32 = 2;

    /// Mask for extracting state from header.
    pub const MASK: u32 = (1 << Self::BITS) - 1;

    /// Creates state from raw 2-bit value.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & Self::MASK {
            0 => Self::Fresh,
            1 => Self::Running,
            2 => Self::Suspended,
            _ => Self::Exhausted,
        }
    }

    /// Returns true if the generator can be stepped.
    #[inline(always)]
    pub const fn is_resumable(self) -> bool {
        matches!(self, Self::Fresh | Self::Suspended)
    }

    /// Returns true if the generator is finished.
    #[inline(always)]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns the display name for this state.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fresh => "GEN_FRESH",
            Self::Running => "GEN_RUNNING",
            Self::Suspended => "GEN_SUSPENDED",
            Self::Exhausted => "GEN_EXHAUSTED",
        }
    }
}

impl fmt::Display for GeneratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Generator Header
// ============================================================================

/// Tagged header combining state and resume index.
///
/// ```text
/// +-------------------+-------+
/// | Resume Index (30) | State |
/// |                   | (2)   |
/// +-------------------+-------+
/// MSB                       LSB
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorHeader {
    bits: u32,
}

impl GeneratorHeader {
    /// Maximum resume index (2^30 - 1).
    pub const MAX_RESUME_INDEX: u32 = (1 << 30) - 1;

    const RESUME_SHIFT: u32 = GeneratorState::BITS;

    /// Creates a new header in Fresh state at the body entry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            bits: GeneratorState::Fresh as u32,
        }
    }

    #[cfg(test)]
    fn with_state_and_point(state: GeneratorState, point: ResumePoint) -> Self {
        let mut header = Self::new();
        header.set_state_and_point(state, point);
        header
    }

    /// Gets the current state.
    #[inline(always)]
    pub const fn state(self) -> GeneratorState {
        GeneratorState::from_bits(self.bits)
    }

    /// Gets the current resume point.
    #[inline(always)]
    pub const fn resume_point(self) -> ResumePoint {
        ResumePoint::new(self.bits >> Self::RESUME_SHIFT)
    }

    /// Sets the state, preserving the resume index.
    #[inline]
    pub fn set_state(&mut self, state: GeneratorState) {
        self.bits = (self.bits & !GeneratorState::MASK) | (state as u32);
    }

    /// Sets the resume point, preserving the state.
    #[inline]
    pub fn set_resume_point(&mut self, point: ResumePoint) {
        let state = self.state();
        self.set_state_and_point(state, point);
    }

    /// Sets both state and resume point.
    #[inline]
    pub fn set_state_and_point(&mut self, state: GeneratorState, point: ResumePoint) {
        debug_assert!(point.index() <= Self::MAX_RESUME_INDEX);
        self.bits = (point.index() << Self::RESUME_SHIFT) | (state as u32);
    }

    /// Transitions to Running if currently resumable.
    ///
    /// Returns the previous state on success, `None` if not resumable.
    #[inline]
    pub fn try_start(&mut self) -> Option<GeneratorState> {
        let old_state = self.state();
        if !old_state.is_resumable() {
            return None;
        }
        self.set_state(GeneratorState::Running);
        Some(old_state)
    }

    /// Transitions to Suspended at the given resume point. Only valid when Running.
    #[inline]
    pub fn suspend(&mut self, point: ResumePoint) {
        debug_assert_eq!(self.state(), GeneratorState::Running);
        self.set_state_and_point(GeneratorState::Suspended, point);
    }

    /// Transitions to Exhausted.
    #[inline]
    pub fn exhaust(&mut self) {
        // Resume index kept for debugging
        self.set_state(GeneratorState::Exhausted);
    }

    /// Returns true if a step is in progress.
    #[inline(always)]
    pub const fn is_running(self) -> bool {
        matches!(self.state(), GeneratorState::Running)
    }

    /// Returns true if the generator can be stepped.
    #[inline(always)]
    pub const fn is_resumable(self) -> bool {
        self.state().is_resumable()
    }

    /// Returns true if the generator is exhausted.
    #[inline(always)]
    pub const fn is_exhausted(self) -> bool {
        self.state().is_finished()
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.bits
    }
}

impl fmt::Debug for GeneratorHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorHeader")
            .field("state", &self.state())
            .field("resume_index", &self.resume_point().index())
            .field("raw", &format_args!("{:#010x}", self.raw()))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
