//! wavesearch - WaveSearch HTTP service
//!
//! Takes no options: configuration comes from the environment, optionally
//! seeded from a `.env` file in the working directory.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use wavesearch_server::ServerConfig;

mod tracing_setup;

const ENVIRONMENT_HELP: &str = "\
Environment:
  POSTGRES_URL              Postgres connection string (falls back to PG* variables)
  PORT                      Port to listen on [default: 3001]
  HOST                      Address to bind [default: 0.0.0.0]
  DB_MAX_CONNECTIONS        Pool size [default: 10]
  DB_ACQUIRE_TIMEOUT_SECS   Pool acquire timeout [default: 30]
  DB_VERIFY_ON_STARTUP      Connect to the database before listening [default: false]
  JSON_BODY_LIMIT           Maximum JSON body size [default: 100kb]
  JSON_BODY_STRICT          Only accept objects and arrays [default: true]
  RUST_LOG                  Log filter [default: info]";

#[derive(Parser, Debug)]
#[command(name = "wavesearch", version, about = "WaveSearch HTTP service", after_help = ENVIRONMENT_HELP)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    Cli::parse();

    // Existing variables win over .env entries.
    let dotenv = dotenvy::dotenv();
    tracing_setup::init().ok();
    match dotenv {
        Ok(path) => debug!("Loaded .env from {}", path.display()),
        Err(err) if err.not_found() => debug!("No .env file found, using environment only"),
        Err(err) => warn!("Ignoring unreadable .env file: {}", err),
    }

    let config = ServerConfig::from_env().context("Invalid configuration")?;

    wavesearch_server::start(config)
        .await
        .context("Server error")?;

    Ok(())
}
