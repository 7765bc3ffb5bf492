//! Custom Axum extractors

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use serde_json::Value;

use super::error::ApiError;

/// Request body already decoded by the JSON body middleware
///
/// Present only when the request declared `application/json` and carried a
/// non-empty body. Use `Option<JsonBody>` when the body is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

impl<S> FromRequestParts<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JsonBody>()
            .cloned()
            .ok_or_else(|| ApiError::BadRequest {
                message: "expected a JSON request body".into(),
            })
    }
}

impl<S> OptionalFromRequestParts<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<JsonBody>().cloned())
    }
}
