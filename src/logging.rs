//! Logging initialization for ossprey-scan.
//!
//! Diagnostics go to stderr so that the compact inventory printed on stdout
//! stays machine-readable.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects `debug`
/// and the default is `warn`.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {}", e))?;

    Ok(())
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LEVEL
    } else {
        DEFAULT_LEVEL
    }
}
