//! # Structured Logging Module
//!
//! Installs a `tracing` subscriber that writes human-readable events to
//! stderr, keeping stdout free for command output. The level is taken from
//! `RUST_LOG` and defaults to `info`.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Default filter when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "info";

/// Initialize logging once per process
///
/// Safe to call repeatedly, and tolerant of a global subscriber installed by
/// someone else.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true)
            .try_init();

        if result.is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }
    });
}
