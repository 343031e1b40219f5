//! Shared `tracing` setup for the workspace binaries.
//!
//! `RUST_LOG` wins when set; otherwise each binary passes its own default directives.

use tracing_subscriber::EnvFilter;

/// Builds the filter from `RUST_LOG`, falling back to `default_directives`.
pub fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives.into())
}

/// Installs the global fmt subscriber. Later calls are no-ops.
pub fn init(default_directives: &str) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directives))
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(directives = default_directives, "logging initialised");
    }
}
