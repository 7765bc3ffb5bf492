//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS
//! - JSON body parsing with per-request client errors
//! - Request tracing
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod json_body;
pub mod server;

pub use error::ApiError;
pub use extractors::JsonBody;
pub use server::{bind, build_router, run_server, serve};
