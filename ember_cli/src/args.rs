//! Command-line argument definitions.
//!
//! Parsing is delegated to `clap`; this module only declares the surface.
//! Validation that depends on the chosen sequence lives in
//! [`crate::config`].

use clap::Parser;

/// Environment variable consulted when `--limit` is absent.
pub const LIMIT_ENV: &str = "EMBER_LIMIT";

/// Environment variable consulted when `--log` is absent.
pub const LOG_ENV: &str = "EMBER_LOG";

/// Raw arguments for the `ember` binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ember", version)]
#[command(about = "Run a lazy sequence and print the values it produces")]
pub struct EmberArgs {
    /// Sequence to run: counter, fibonacci, naturals, squares, some, chain
    pub sequence: String,

    /// Size argument for counter, fibonacci and squares
    pub n: Option<u64>,

    /// Stop after this many values
    #[arg(long, env = LIMIT_ENV)]
    pub limit: Option<u64>,

    /// Text written between values
    #[arg(long, default_value = "\n")]
    pub separator: String,

    /// Log filter directive (e.g. `debug`, `ember_vm=trace`)
    #[arg(long, env = LOG_ENV)]
    pub log: Option<String>,

    /// Suppress the exhaustion report on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl EmberArgs {
    /// Arguments for `sequence` with every option at its default.
    #[cfg(test)]
    pub fn for_sequence(sequence: &str) -> Self {
        Self {
            sequence: sequence.to_string(),
            n: None,
            limit: None,
            separator: "\n".to_string(),
            log: None,
            quiet: false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_env::parse;
    use super::*;
    use test_log::test;

    #[test]
    fn test_sequence_and_n() {
        let args = parse(&["counter", "5"]);
        assert_eq!(args.sequence, "counter");
        assert_eq!(args.n, Some(5));
        assert_eq!(args.limit, None);
        assert_eq!(args.log, None);
        assert_eq!(args.separator, "\n");
        assert!(!args.quiet);
    }

    #[test]
    fn test_n_is_optional() {
        let args = parse(&["some"]);
        assert_eq!(args.n, None);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "naturals",
            "--limit",
            "3",
            "--separator",
            ",",
            "--log",
            "debug",
            "-q",
        ]);
        assert_eq!(args.limit, Some(3));
        assert_eq!(args.separator, ",");
        assert_eq!(args.log.as_deref(), Some("debug"));
        assert!(args.quiet);
    }

    #[test]
    fn test_missing_sequence_is_rejected() {
        let _env = test_env::ScopedEnv::new();
        assert!(EmberArgs::try_parse_from(["ember"]).is_err());
    }

    #[test]
    fn test_non_numeric_n_is_rejected() {
        let _env = test_env::ScopedEnv::new();
        assert!(EmberArgs::try_parse_from(["ember", "counter", "five"]).is_err());
    }
}
