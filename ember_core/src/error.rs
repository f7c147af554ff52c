//! Error types and result definitions for Ember.
//!
//! Two families live here:
//! - [`GeneratorError`]: everything the step protocol can report besides a
//!   produced value (illegal resumption, stop signals, body failures)
//! - [`EmberError`]: application-level failures raised while selecting and
//!   configuring a sequence to run

use std::convert::Infallible;
use std::fmt;
use thiserror::Error;

/// The unified result type for application-level operations.
pub type EmberResult<T> = Result<T, EmberError>;

/// Result of driving a generator whose body fails with `E`.
pub type GeneratorResult<T, E = Infallible> = Result<T, GeneratorError<E>>;

// ============================================================================
// Generator Errors
// ============================================================================

/// Errors surfaced by the step protocol.
///
/// `E` is the error type of the computation body. Body failures are carried
/// through [`GeneratorError::Body`] untouched so callers can match on their
/// own error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError<E = Infallible> {
    /// `step` was called on a generator that is already exhausted.
    #[error("IllegalResume: cannot resume an exhausted generator")]
    IllegalResume,

    /// A value was demanded but the sequence has no more values.
    #[error("StopIteration")]
    StopIteration,

    /// The generator is in the middle of a step (reentrant resume).
    #[error("ValueError: generator already executing")]
    AlreadyRunning,

    /// A delegation link is already active on the outer generator.
    #[error("RuntimeError: generator is already delegating to an inner generator")]
    DelegationActive,

    /// The body asked to resume at a point the header cannot encode. The
    /// generator is now exhausted.
    #[error("RuntimeError: resume point @{index} is out of range")]
    ResumeOutOfRange {
        /// The rejected resume index.
        index: u32,
    },

    /// The computation body failed. The generator is now exhausted.
    #[error("{0}")]
    Body(E),
}

impl<E> GeneratorError<E> {
    /// Returns true if this error means "no more values".
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::StopIteration | Self::IllegalResume)
    }

    /// Returns true if the body itself failed.
    #[inline]
    pub fn is_body(&self) -> bool {
        matches!(self, Self::Body(_))
    }

    /// Extracts the body error, if any.
    #[inline]
    pub fn into_body(self) -> Option<E> {
        match self {
            Self::Body(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the protocol-level name of this error kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::IllegalResume => "IllegalResume",
            Self::StopIteration => "StopIteration",
            Self::AlreadyRunning => "AlreadyRunning",
            Self::DelegationActive => "DelegationActive",
            Self::ResumeOutOfRange { .. } => "ResumeOutOfRange",
            Self::Body(_) => "BodyError",
        }
    }
}

impl GeneratorError<Infallible> {
    /// Widens an error from an infallible body into any body error type.
    #[must_use]
    pub fn widen<E>(self) -> GeneratorError<E> {
        match self {
            Self::IllegalResume => GeneratorError::IllegalResume,
            Self::StopIteration => GeneratorError::StopIteration,
            Self::AlreadyRunning => GeneratorError::AlreadyRunning,
            Self::DelegationActive => GeneratorError::DelegationActive,
            Self::ResumeOutOfRange { index } => GeneratorError::ResumeOutOfRange { index },
            Self::Body(never) => match never {},
        }
    }
}

// ============================================================================
// Application Errors
// ============================================================================

/// Errors raised while selecting and configuring a sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmberError {
    /// No sequence with this name is registered.
    #[error("UnknownSequence: no sequence named '{name}'")]
    UnknownSequence {
        /// The requested name.
        name: String,
    },

    /// A sequence requires an argument that was not supplied.
    #[error("MissingArgument: sequence '{sequence}' requires <{argument}>")]
    MissingArgument {
        /// The sequence being configured.
        sequence: String,
        /// The missing argument.
        argument: &'static str,
    },

    /// An infinite sequence was requested without a limit.
    #[error("Unbounded: sequence '{sequence}' is infinite; pass --limit")]
    Unbounded {
        /// The sequence being configured.
        sequence: String,
    },

    /// A step failed while running a sequence.
    #[error("RuntimeError: {message}")]
    Runtime {
        /// Rendered generator error.
        message: String,
    },

    /// Writing produced values failed.
    #[error("IOError: {message}")]
    Io {
        /// Rendered I/O error.
        message: String,
    },
}

impl From<std::io::Error> for EmberError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl EmberError {
    /// Create an unknown sequence error.
    #[must_use]
    pub fn unknown_sequence(name: impl Into<String>) -> Self {
        Self::UnknownSequence { name: name.into() }
    }

    /// Create a missing argument error.
    #[must_use]
    pub fn missing_argument(sequence: impl Into<String>, argument: &'static str) -> Self {
        Self::MissingArgument {
            sequence: sequence.into(),
            argument,
        }
    }

    /// Create an unbounded sequence error.
    #[must_use]
    pub fn unbounded(sequence: impl Into<String>) -> Self {
        Self::Unbounded {
            sequence: sequence.into(),
        }
    }

    /// Create a runtime error from any failed step.
    #[must_use]
    pub fn runtime<E: fmt::Display>(err: &GeneratorError<E>) -> Self {
        Self::Runtime {
            message: err.to_string(),
        }
    }

    /// Returns true for errors caused by how the program was invoked.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        !matches!(self, Self::Runtime { .. } | Self::Io { .. })
    }
}
