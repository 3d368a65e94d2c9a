#![warn(missing_docs)]

//! Shared tracing filter policy and subscriber setup for the rogue workspace.
//!
//! - [`compute_spec`]: resolve the effective filter directive from settings and `RUST_LOG`
//! - [`init`]: install a compact subscriber for applications
//! - [`init_for_tests`]: install a test-writer subscriber once per process

use std::{env, sync::OnceLock};

use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logging controls, typically deserialized from a settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// A single level for our crates (error|warn|info|debug|trace).
    pub level: Option<String>,
    /// An explicit tracing filter directive, overriding `level`,
    /// e.g. "rogue=trace,rogue_mock=debug".
    pub filter: Option<String>,
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &["rogue", "rogue_mock", "logging"]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `filter`
/// - `level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(settings: &LogSettings) -> String {
    if let Some(spec) = settings.filter.as_deref() {
        return spec.to_string();
    }
    if let Some(lvl) = settings.level.as_deref() {
        return level_spec_for(lvl);
    }
    env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info"))
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install a global subscriber with compact output (no timestamps).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(settings: &LogSettings) -> bool {
    let filter = env_filter_from_spec(&compute_spec(settings));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time())
        .try_init()
        .is_ok()
}

/// Global flag to track whether test logging has been initialized.
static TEST_LOGGING: OnceLock<()> = OnceLock::new();

/// Install a subscriber that writes through the test harness, once per process.
///
/// Honors `RUST_LOG`; defaults to crate-scoped `warn` so passing tests stay quiet.
pub fn init_for_tests() {
    TEST_LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| env_filter_from_spec(&level_spec_for("warn")));
        let _ignored = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().without_time().with_test_writer())
            .try_init();
    });
}
