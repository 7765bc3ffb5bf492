//! Axum server setup
//!
//! Middleware stack, outermost first:
//! - Request tracing
//! - Permissive CORS (any origin)
//! - JSON body parsing
//!
//! There is no graceful shutdown; the server runs until the process exits.

use axum::http::{Method, Uri};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::json_body::parse_json_body;
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::state::AppState;

/// Build the application router around caller-supplied routes.
///
/// Unmatched requests get a JSON 404. Layers wrap the fallback too, so every
/// response carries CORS headers, including JSON rejections.
pub fn build_router(routes: Router<AppState>, state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any);

    routes
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(config.json_body, parse_json_body))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Bind the listening socket.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })
}

/// Serve `routes` on an already bound listener until the process exits.
pub async fn serve(
    listener: TcpListener,
    routes: Router<AppState>,
    state: AppState,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    let app = build_router(routes, state, config);

    tracing::info!(%addr, "Server running on port {}", addr.port());
    axum::serve(listener, app).await?;
    Ok(())
}

/// Bind and run the HTTP server with no routes mounted.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&config.database);
/// run_server(AppState::new(pool), config).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let listener = bind(&config).await?;
    serve(listener, Router::new(), state, &config).await
}
