//! wavesearch-server: HTTP service bootstrap for WaveSearch
//!
//! Brings the process from cold start to accepting HTTP connections:
//! permissive CORS, JSON request bodies, and a lazily connected Postgres
//! pool shared through [`AppState`].

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{Result, ServerError};
pub use state::AppState;

/// Run the full startup sequence and serve until the process exits.
///
/// The pool is created without connecting unless
/// `database.verify_on_startup` is set, in which case an unreachable
/// database fails startup before the socket is bound.
pub async fn start(config: ServerConfig) -> Result<()> {
    if !config.database.url_configured {
        tracing::warn!(
            "{} not set, falling back to PG* environment defaults",
            config::DATABASE_URL_VAR
        );
    }

    let pool = db::create_pool(&config.database);
    tracing::debug!(
        max_connections = config.database.max_connections,
        "Database pool created (lazy)"
    );

    if config.database.verify_on_startup {
        db::verify_connection(&pool).await?;
        tracing::info!("Database connection verified");
    }

    http::run_server(AppState::new(pool), config).await
}
