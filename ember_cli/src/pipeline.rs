//! Execution pipeline: config → generator → consumer → stdout.
//!
//! Every CLI sequence is instantiated Fresh, then driven by one of two
//! consumers: [`drain`] iterates until exhaustion or the limit, and [`pull`]
//! demands values one at a time with `next_or_fail` until the sequence
//! signals `StopIteration`.

use crate::config::{RuntimeConfig, SequenceKind};
use crate::error;
use ember_core::{EmberError, EmberResult, GeneratorError};
use ember_vm::generators::{instantiate, next_or_fail, SequenceSource};
use ember_vm::stdlib::itertools::{comprehension, second, some, Counter, Fibonacci, Naturals};
use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, info};

// =============================================================================
// Public Pipeline Functions
// =============================================================================

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Values written to the output.
    pub produced: u64,
    /// Whether the sequence ran out of values (as opposed to hitting the limit).
    pub exhausted: bool,
    /// Stop signal raised by a demanding consumer, if any.
    pub stop_signal: Option<String>,
}

/// Run the configured sequence against stdout.
///
/// Returns the process exit code.
pub fn run(config: &RuntimeConfig) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match execute(config, &mut out) {
        Ok(summary) => {
            info!(
                produced = summary.produced,
                exhausted = summary.exhausted,
                "run complete"
            );
            if let Some(signal) = &summary.stop_signal {
                if !config.quiet {
                    eprintln!("{signal}");
                }
            }
            ExitCode::from(error::EXIT_SUCCESS)
        }
        Err(e) => error::report(&e),
    }
}

/// Run the configured sequence, writing its values to `out`.
pub fn execute<W: Write>(config: &RuntimeConfig, out: &mut W) -> EmberResult<RunSummary> {
    info!(sequence = %config.sequence, n = ?config.n, limit = ?config.limit, "running sequence");
    let n = config.n_or_zero();
    let mut sink = ValueSink::new(out, config);

    let outcome = match config.sequence {
        SequenceKind::Counter => drain(&mut instantiate::<Counter>(n), &mut sink),
        SequenceKind::Fibonacci => drain(&mut instantiate::<Fibonacci>(n), &mut sink),
        SequenceKind::Naturals => drain(&mut instantiate::<Naturals>(()), &mut sink),
        SequenceKind::Squares => drain(
            &mut comprehension(0..n, |i| u128::from(i) * u128::from(i)),
            &mut sink,
        ),
        SequenceKind::Some => pull(&mut some(), &mut sink),
        SequenceKind::Chain => drain(&mut second(), &mut sink),
    };

    // Values written before a failure stay visible.
    let finished = sink.finish();
    let (exhausted, stop_signal) = outcome?;
    let produced = finished?;

    Ok(RunSummary {
        produced,
        exhausted,
        stop_signal,
    })
}

// =============================================================================
// Consumers
// =============================================================================

type Outcome = EmberResult<(bool, Option<String>)>;

/// Iterate `source` until it is exhausted or the sink is full.
fn drain<S, W>(source: &mut S, sink: &mut ValueSink<'_, W>) -> Outcome
where
    S: SequenceSource,
    S::Item: Display,
    S::Error: Display,
    W: Write,
{
    let mut values = source.iter();
    while !sink.is_full() {
        match values.next() {
            Some(Ok(value)) => sink.push(&value)?,
            Some(Err(e)) => return Err(EmberError::runtime(&e)),
            None => break,
        }
    }
    Ok((source.is_exhausted(), None))
}

/// Demand values from `source` until it signals `StopIteration` or the sink
/// is full.
fn pull<S, W>(source: &mut S, sink: &mut ValueSink<'_, W>) -> Outcome
where
    S: SequenceSource,
    S::Item: Display,
    S::Error: Display,
    W: Write,
{
    while !sink.is_full() {
        match next_or_fail(source) {
            Ok(value) => sink.push(&value)?,
            Err(GeneratorError::StopIteration) => {
                debug!("sequence raised StopIteration");
                return Ok((true, Some(GeneratorError::<S::Error>::StopIteration.to_string())));
            }
            Err(e) => return Err(EmberError::runtime(&e)),
        }
    }
    Ok((false, None))
}

// =============================================================================
// Output
// =============================================================================

/// Writes values joined by the configured separator, stopping at the limit.
struct ValueSink<'a, W: Write> {
    out: &'a mut W,
    separator: &'a str,
    limit: Option<u64>,
    written: u64,
}

impl<'a, W: Write> ValueSink<'a, W> {
    fn new(out: &'a mut W, config: &'a RuntimeConfig) -> Self {
        Self {
            out,
            separator: &config.separator,
            limit: config.limit,
            written: 0,
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.written >= limit)
    }

    fn push(&mut self, value: &dyn Display) -> EmberResult<()> {
        if self.written > 0 {
            self.out.write_all(self.separator.as_bytes())?;
        }
        write!(self.out, "{value}")?;
        self.written += 1;
        Ok(())
    }

    /// Terminate the output line and flush. Returns the number of values.
    fn finish(self) -> EmberResult<u64> {
        if self.written > 0 {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(self.written)
    }
}

// =============================================================================
// Tests
// =============================================================================
