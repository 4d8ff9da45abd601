//! # Request Tracking
//!
//! Assigns each request a correlation id, times it, and emits one access
//! log line per request. A client-supplied `x-request-id` is honored only
//! when it looks like a CUID2, so arbitrary text cannot reach the logs.

use axum::{extract::Request, middleware::Next, response::Response};
use error::middleware::RequestLogger;
use http::HeaderValue;
use logging::RequestId;

/// Header carrying the request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Access-log and correlation-id middleware, applied to the whole router.
pub async fn track_requests(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(RequestId::from_header)
        .unwrap_or_default();

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(request_id.clone());

    let start = std::time::Instant::now();
    let mut response = next.run(request).await;
    let elapsed_ms = start.elapsed().as_millis();

    if !RequestLogger::new().should_skip(&path) {
        logging::log_api_request!(method, path, response.status().as_u16(), elapsed_ms);
    }

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
