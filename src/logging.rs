// Tracing setup for the binary.

use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder};

use crate::error::{CacheError, Result};

/// Install the global fmt subscriber, using `default_filter` when `RUST_LOG` is unset.
///
/// Logs go to stderr so stdout stays clean for JSON output.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CacheError::Other(format!("failed to initialize tracing: {}", e)))
}
