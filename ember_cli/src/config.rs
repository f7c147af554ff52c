//! Runtime configuration.
//!
//! Resolves parsed arguments into a validated [`RuntimeConfig`]. Each knob
//! follows the same precedence: command-line flag, then environment
//! variable, then built-in default. `clap` handles the first two; this
//! module supplies the defaults and checks that the chosen sequence has
//! what it needs to terminate.

use crate::args::EmberArgs;
use ember_core::{EmberError, EmberResult};
use std::fmt;
use std::str::FromStr;

/// Log filter used when neither `--log` nor `EMBER_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// =============================================================================
// Sequence Selection
// =============================================================================

/// The sequences the CLI knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// `0, 1, ..., N-1`
    Counter,
    /// First N Fibonacci numbers.
    Fibonacci,
    /// `0, 1, 2, ...` without end.
    Naturals,
    /// `i * i` for `i` in `0..N`.
    Squares,
    /// `1, 2, 3`, pulled one value at a time.
    Some,
    /// Delegates to `[1, 1]`, then yields `2, 2`.
    Chain,
}

impl SequenceKind {
    /// Every registered sequence, in help order.
    pub const ALL: [SequenceKind; 6] = [
        Self::Counter,
        Self::Fibonacci,
        Self::Naturals,
        Self::Squares,
        Self::Some,
        Self::Chain,
    ];

    /// Name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Fibonacci => "fibonacci",
            Self::Naturals => "naturals",
            Self::Squares => "squares",
            Self::Some => "some",
            Self::Chain => "chain",
        }
    }

    /// Whether the sequence needs the positional `N`.
    pub const fn takes_n(self) -> bool {
        matches!(self, Self::Counter | Self::Fibonacci | Self::Squares)
    }

    /// Whether the sequence never exhausts on its own.
    pub const fn is_infinite(self) -> bool {
        matches!(self, Self::Naturals)
    }
}

impl FromStr for SequenceKind {
    type Err = EmberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| EmberError::unknown_sequence(s))
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Validated settings for one run of the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Sequence to run.
    pub sequence: SequenceKind,
    /// Size argument, present whenever the sequence takes one.
    pub n: Option<u64>,
    /// Maximum number of values to print.
    pub limit: Option<u64>,
    /// Text written between values.
    pub separator: String,
    /// `EnvFilter` directive for the tracing subscriber.
    pub log_filter: String,
    /// Suppress the exhaustion report.
    pub quiet: bool,
}

impl RuntimeConfig {
    /// Build and validate a configuration from parsed arguments.
    pub fn from_args(args: &EmberArgs) -> EmberResult<Self> {
        let sequence: SequenceKind = args.sequence.parse()?;

        if sequence.takes_n() && args.n.is_none() {
            return Err(EmberError::missing_argument(sequence.name(), "N"));
        }
        if sequence.is_infinite() && args.limit.is_none() {
            return Err(EmberError::unbounded(sequence.name()));
        }

        Ok(Self {
            sequence,
            n: args.n,
            limit: args.limit,
            separator: args.separator.clone(),
            log_filter: args
                .log
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            quiet: args.quiet,
        })
    }

    /// Size argument, or zero for sequences that ignore it.
    #[inline]
    pub fn n_or_zero(&self) -> u64 {
        self.n.unwrap_or(0)
    }
}
