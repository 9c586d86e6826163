//! Logging setup for PayGuard binaries.
//!
//! Installs a `tracing` subscriber that writes to stderr, so stdout and the
//! verdict files stay clean. The filter comes from `RUST_LOG` when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "antifraud=info,payguard=info";

/// Build the filter: `RUST_LOG` if set and valid, otherwise `fallback`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into())
}

/// Install the global subscriber.
///
/// Returns quietly if a subscriber is already installed (tests, embedding).
pub fn init(fallback: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(fallback))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Install the global subscriber with [`DEFAULT_FILTER`].
pub fn init_default() {
    init(DEFAULT_FILTER);
}
