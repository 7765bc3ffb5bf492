//! Startup error types for wavesearch-server
//!
//! Per-request failures live in [`crate::http::ApiError`]; everything here is
//! fatal and ends the process.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database unreachable: {0}")]
    Database(#[from] sqlx::Error),
}
