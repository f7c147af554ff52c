//! Exit codes and error reporting for the `ember` binary.

use ember_core::EmberError;
use std::process::ExitCode;

/// The sequence ran to completion or to its limit.
pub const EXIT_SUCCESS: u8 = 0;

/// A step failed while the sequence was running.
pub const EXIT_ERROR: u8 = 1;

/// The invocation itself was wrong.
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Exit code for an application error.
pub const fn exit_code_for(err: &EmberError) -> u8 {
    if err.is_usage() {
        EXIT_USAGE_ERROR
    } else {
        EXIT_ERROR
    }
}

/// Print `err` to stderr and return the matching exit code.
pub fn report(err: &EmberError) -> ExitCode {
    tracing::debug!(error = %err, "run failed");
    eprintln!("ember: {err}");
    ExitCode::from(exit_code_for(err))
}
