//! Database connection pool management
//!
//! Uses a lazy sqlx `PgPool`: building the pool never opens a connection,
//! so an unreachable database only shows up when a connection is acquired.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};

use crate::config::DatabaseConfig;

/// Create a PostgreSQL connection pool without connecting.
///
/// Must be called from within a Tokio runtime, the pool spawns its
/// maintenance task on creation.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::from_env()?;
/// let pool = create_pool(&config.database);
/// ```
pub fn create_pool(config: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(config.connect_options.clone())
}

/// Acquire one connection and ping it.
///
/// # Errors
///
/// Returns the driver error if no connection could be established.
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await
}
