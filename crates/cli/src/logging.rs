//! Process-wide tracing subscriber.
//!
//! Logs go to stderr so stdout carries only the run summary. `RUST_LOG`
//! takes precedence over the level chosen from the command line.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

fn resolve_filter(quiet: bool) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(if quiet { "warn" } else { "info" }),
    }
}

/// Install the global subscriber. A subscriber installed earlier (by a test
/// harness, say) is left in place.
pub fn init(quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(quiet))
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
