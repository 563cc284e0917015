//! Tracing setup for the moodlift binary.
//!
//! Usage:
//!   moodlift --debug serve             # Debug logging to console
//!   RUST_LOG=moodlift=debug moodlift   # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize console tracing.
///
/// Precedence: RUST_LOG, then the --debug flag, then the configured default
/// level, then "info".
pub fn init_tracing(debug: bool, default_level: Option<&str>) -> Result<()> {
    let fallback = if debug {
        "debug".to_string()
    } else {
        default_level.unwrap_or("info").to_string()
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
