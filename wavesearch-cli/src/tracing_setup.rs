//! Tracing setup for the wavesearch binary
//!
//! Environment variables:
//!   RUST_LOG    # Log filter (default: info)
//!
//! Request logs come from tower-http at debug level, e.g.
//! `RUST_LOG=info,tower_http=debug`.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Initialize console tracing.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
