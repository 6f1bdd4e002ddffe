//! Debug logging of inbound request details

use std::collections::BTreeMap;

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode, header};

/// Largest body buffered for logging
const MAX_LOGGED_BODY: usize = 2 * 1024 * 1024;

/// Middleware that logs method, URI, headers, query, cookies and body
///
/// Only active when `debug` is enabled for this module. The body is
/// buffered, logged, and handed on to the next layer unchanged.
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, uri = %parts.uri, "request body could not be buffered");
            return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
        }
    };

    tracing::debug!(
        method = %parts.method,
        uri = %parts.uri,
        headers = ?header_map(&parts.headers),
        query = ?query_params(parts.uri.query()),
        cookies = ?cookies(&parts.headers),
        body = %body_for_log(&bytes),
        "inbound request"
    );

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<binary>");
            (name.as_str().to_owned(), value.to_owned())
        })
        .collect()
}

fn query_params(query: Option<&str>) -> BTreeMap<String, String> {
    query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key.to_owned(), value.to_owned())
        })
        .collect()
}

fn cookies(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='))
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect()
}

fn body_for_log(bytes: &Bytes) -> String {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .map_or_else(|_| "invalid JSON or empty body".to_owned(), |json| json.to_string())
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn parses_query_pairs() {
        let params = query_params(Some("api-version=2024-02-01&verbose&empty="));

        assert_eq!(params.get("api-version").map(String::as_str), Some("2024-02-01"));
        assert_eq!(params.get("verbose").map(String::as_str), Some(""));
        assert_eq!(params.get("empty").map(String::as_str), Some(""));
        assert!(query_params(None).is_empty());
    }

    #[test]
    fn parses_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc; theme=dark"));

        let jar = cookies(&headers);
        assert_eq!(jar.len(), 2);
        assert_eq!(jar["session"], "abc");
        assert_eq!(jar["theme"], "dark");
    }

    #[test]
    fn non_json_body_gets_placeholder() {
        assert_eq!(body_for_log(&Bytes::from_static(b"")), "invalid JSON or empty body");
        assert_eq!(body_for_log(&Bytes::from_static(br#"{"a":1}"#)), r#"{"a":1}"#);
    }
}
