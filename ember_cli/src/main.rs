//! Ember: run lazy sequences from the command line.
//!
//! `ember <SEQUENCE> [N]` instantiates one of the built-in generators and
//! prints the values it produces, one step at a time.

mod args;
mod config;
mod error;
mod logging;
mod pipeline;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    // clap exits with status 2 on malformed arguments.
    let parsed = args::EmberArgs::parse();

    let config = match config::RuntimeConfig::from_args(&parsed) {
        Ok(c) => c,
        Err(e) => return error::report(&e),
    };

    logging::init_logging(&config.log_filter);
    tracing::trace!(version = ember_core::VERSION, "ember starting");

    pipeline::run(&config)
}
