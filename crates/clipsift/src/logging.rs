//! Logging initialization.
//!
//! Structured logging via the `tracing` ecosystem, written to stderr so
//! stdout stays reserved for run output. The base level comes from
//! `logging.level` in the config file, `--verbose` raises it to debug, and
//! `RUST_LOG` overrides both.

use clipsift_core::config::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem from config plus CLI overrides.
pub fn init(config: &LoggingConfig, verbose: bool, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(resolve_level(config, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs || config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Pick the effective level string: `--verbose` wins unless the config
/// already asks for something chattier.
fn resolve_level<'a>(config: &'a LoggingConfig, verbose: bool) -> &'a str {
    if verbose && config.level != "trace" {
        "debug"
    } else {
        config.level.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_level(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_resolve_level_defaults_to_config() {
        assert_eq!(resolve_level(&config_with_level("warn"), false), "warn");
        assert_eq!(resolve_level(&config_with_level("info"), false), "info");
    }

    #[test]
    fn test_resolve_level_verbose_raises_to_debug() {
        assert_eq!(resolve_level(&config_with_level("info"), true), "debug");
        assert_eq!(resolve_level(&config_with_level("error"), true), "debug");
    }

    #[test]
    fn test_resolve_level_verbose_keeps_trace() {
        assert_eq!(resolve_level(&config_with_level("trace"), true), "trace");
    }
}
