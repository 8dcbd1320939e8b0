use std::io::{self, IsTerminal};

/// Initialises tracing on stderr; stdout carries the summary and worker JSON.
///
/// Priority: `RUST_LOG` env var > the level derived from `-q`/`-v`.
pub(crate) fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(filter)
        .try_init();
}

/// Returns the filter to hand to worker processes.
///
/// `env_value` is the parent's `RUST_LOG`; a blank value counts as unset.
pub(crate) fn worker_log_filter(env_value: Option<String>, default_level: &str) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default_level.to_string())
}
