//! Logging System
//!
//! Installs a `tracing` subscriber that writes to stderr so log lines never
//! interleave with values on stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::DEFAULT_LOG_FILTER;

/// Build the filter for `directive`, falling back to the default level when
/// the directive does not parse.
pub fn build_env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("ember: invalid log filter '{directive}': {err}; using '{DEFAULT_LOG_FILTER}'");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

/// Initialize the logging system.
///
/// A second call is a no-op; the first subscriber stays installed.
pub fn init_logging(directive: &str) {
    let subscriber = Registry::default().with(build_env_filter(directive)).with(
        fmt::layer()
            .with_target(true)
            .without_time()
            .with_writer(std::io::stderr),
    );
    if subscriber.try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_directive() {
        let filter = build_env_filter("ember_vm=trace,warn");
        assert!(filter.to_string().contains("ember_vm=trace"));
    }

    #[test]
    fn test_invalid_directive_falls_back() {
        let filter = build_env_filter("ember_vm=loud");
        assert_eq!(filter.to_string(), DEFAULT_LOG_FILTER);
    }
}
