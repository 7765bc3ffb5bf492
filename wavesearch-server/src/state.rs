//! Application state shared across handlers

use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use std::sync::Arc;

use crate::http::ApiError;

/// Shared application state
///
/// Built once at startup and handed to the router; clones share the pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool }),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Acquire a pooled connection for the current request.
    ///
    /// The returned guard goes back to the pool when dropped, on success and
    /// error paths alike. Hold it for the request only.
    pub async fn connection(&self) -> Result<PoolConnection<Postgres>, ApiError> {
        Ok(self.inner.pool.acquire().await?)
    }
}
