//! Tracing bootstrap for the CLI.

use std::env;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,chatroster_core=debug,chatroster_cli=debug";
const LOG_ENV: &str = "CHATROSTER_LOG";

/// Install the global subscriber, writing to stderr so stdout carries only
/// the transcript.
///
/// Filter precedence:
/// 1) `RUST_LOG`
/// 2) `CHATROSTER_LOG`
/// 3) internal default filter
pub fn init() {
    let env_filter = filter_from_env();
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .try_init();
}

fn filter_from_env() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let custom = env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty());
    if let Some(filter) = custom.and_then(|value| EnvFilter::try_new(value).ok()) {
        return filter;
    }

    EnvFilter::new(DEFAULT_FILTER)
}
