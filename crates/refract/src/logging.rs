//! Logging initialization.
//!
//! The library logs through `tracing` on three targets: `refract::error` for
//! fallbacks, `refract::trace` for pipeline steps and cache keys, and
//! `refract::perf` for remote call timing. This module installs the
//! subscriber that renders them.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl LogSettings {
    /// Merge the `[logging]` config section with CLI flags.
    ///
    /// `--verbose` raises the level to debug unless config already asks for
    /// trace; `--json-logs` forces JSON regardless of config.
    pub fn resolve(config: &refract_core::Config, verbose: bool, json_logs: bool) -> Self {
        let configured = config.logging.level.to_lowercase();
        let level = if verbose && configured != "trace" {
            "debug".to_string()
        } else {
            configured
        };
        Self {
            level,
            json: json_logs || config.logging.format == "json",
        }
    }
}

/// Install the global subscriber. Output goes to stderr; stdout carries the
/// enhanced prompt so it can be piped.
pub fn init(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let registry = tracing_subscriber::registry().with(filter);
    if settings.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(settings.level == "trace")
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging from config with CLI overrides.
pub fn init_from_config(config: &refract_core::Config, verbose: bool, json_logs: bool) {
    init(&LogSettings::resolve(config, verbose, json_logs));
}
