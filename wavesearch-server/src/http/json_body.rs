//! JSON body middleware
//!
//! Requests declaring `Content-Type: application/json` have their body read
//! (up to [`JsonBodyConfig::limit`]), parsed once, and exposed to handlers
//! through the [`JsonBody`] extension. The raw bytes are put back so that
//! `axum::Json<T>` keeps working downstream. Anything else passes through.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use http_body_util::LengthLimitError;
use serde_json::Value;

use super::error::ApiError;
use super::extractors::JsonBody;
use crate::config::JsonBodyConfig;

/// Middleware entry point, install with `axum::middleware::from_fn_with_state`.
pub async fn parse_json_body(
    State(config): State<JsonBodyConfig>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let request = decode(config, request).await.inspect_err(|err| {
        tracing::debug!(error = ?err, "rejected JSON request body");
    })?;
    Ok(next.run(request).await)
}

async fn decode(config: JsonBodyConfig, request: Request) -> Result<Request, ApiError> {
    match media_type(request.headers()) {
        Some(media) if media.essence.eq_ignore_ascii_case("application/json") => {
            if let Some(charset) = media.charset {
                if !is_utf8(charset) {
                    return Err(ApiError::UnsupportedCharset {
                        charset: charset.to_ascii_lowercase(),
                    });
                }
            }
        }
        _ => return Ok(request),
    }

    if declared_length(request.headers()).is_some_and(|len| len > config.limit) {
        return Err(ApiError::PayloadTooLarge {
            limit: config.limit,
        });
    }

    let (mut parts, body) = request.into_parts();
    let bytes = to_bytes(body, config.limit).await.map_err(|err| {
        if exceeded_limit(&err) {
            ApiError::PayloadTooLarge {
                limit: config.limit,
            }
        } else {
            ApiError::BadRequest {
                message: format!("failed to read request body: {}", err),
            }
        }
    })?;

    if bytes.is_empty() {
        return Ok(Request::from_parts(parts, Body::empty()));
    }

    if config.strict {
        if let Some(first) = bytes.iter().find(|b| !is_json_whitespace(**b)) {
            if *first != b'{' && *first != b'[' {
                return Err(ApiError::InvalidJson {
                    message: "top-level JSON value must be an object or array".into(),
                });
            }
        }
    }

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidJson {
        message: e.to_string(),
    })?;

    parts.extensions.insert(JsonBody(value));
    Ok(Request::from_parts(parts, Body::from(bytes)))
}

struct MediaType<'a> {
    essence: &'a str,
    charset: Option<&'a str>,
}

fn media_type(headers: &HeaderMap) -> Option<MediaType<'_>> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let mut params = value.split(';');
    let essence = params.next()?.trim();
    let charset = params.find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    });
    Some(MediaType { essence, charset })
}

/// True when the read stopped at the size limit rather than on a body error.
fn exceeded_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers.get(CONTENT_LENGTH)?.to_str().ok()?.trim().parse().ok()
}

fn is_utf8(charset: &str) -> bool {
    charset.eq_ignore_ascii_case("utf-8") || charset.eq_ignore_ascii_case("utf8")
}

fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        map
    }

    #[test]
    fn media_type_with_charset() {
        let map = headers("Application/JSON; Charset=\"UTF-8\"");
        let media = media_type(&map).unwrap();
        assert_eq!(media.essence, "Application/JSON");
        assert_eq!(media.charset, Some("UTF-8"));
        assert!(is_utf8(media.charset.unwrap()));
    }

    #[test]
    fn media_type_without_params() {
        let map = headers("text/plain");
        let media = media_type(&map).unwrap();
        assert_eq!(media.essence, "text/plain");
        assert!(media.charset.is_none());
    }

    #[test]
    fn missing_content_type() {
        assert!(media_type(&HeaderMap::new()).is_none());
    }

    #[tokio::test]
    async fn non_json_request_passes_untouched() {
        let request = Request::builder()
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from("{not json"))
            .unwrap();
        let request = decode(JsonBodyConfig::default(), request).await.unwrap();
        assert!(request.extensions().get::<JsonBody>().is_none());
    }

    #[tokio::test]
    async fn empty_json_body_passes_without_value() {
        let request = Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap();
        let request = decode(JsonBodyConfig::default(), request).await.unwrap();
        assert!(request.extensions().get::<JsonBody>().is_none());
    }

    #[tokio::test]
    async fn strict_mode_rejects_scalars() {
        let request = || {
            Request::builder()
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(" \"waves\""))
                .unwrap()
        };

        let err = decode(JsonBodyConfig::default(), request()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson { .. }));

        let lenient = JsonBodyConfig {
            strict: false,
            ..JsonBodyConfig::default()
        };
        let parsed = decode(lenient, request()).await.unwrap();
        assert_eq!(
            parsed.extensions().get::<JsonBody>(),
            Some(&JsonBody(Value::from("waves")))
        );
    }

    #[tokio::test]
    async fn streamed_body_over_limit_is_rejected() {
        let config = JsonBodyConfig {
            limit: 8,
            strict: true,
        };
        // No Content-Length header, so the limit is enforced while reading.
        let chunks = vec![Ok::<_, std::io::Error>("{\"a\": "), Ok("\"0123456789\"}")];
        let request = Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from_stream(futures::stream::iter(chunks)))
            .unwrap();
        let err = decode(config, request).await.unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge { limit: 8 }));
    }

    #[tokio::test]
    async fn interrupted_body_is_bad_request() {
        // Fails well under the limit, e.g. the client reset the upload.
        let chunks = vec![
            Ok("{\"a\""),
            Err(std::io::Error::other("connection reset")),
        ];
        let request = Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from_stream(futures::stream::iter(chunks)))
            .unwrap();
        let err = decode(JsonBodyConfig::default(), request).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }), "{err:?}");
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
