//! # Error Handling Middleware
//!
//! Conversion of application errors into HTTP responses, plus request
//! logging helpers shared by the server.

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{response::ApiResponse, AppError};

/// Error handler that converts errors to HTTP responses.
///
/// With `include_details` off, 5xx messages are replaced with generic
/// wording so database and filesystem internals never reach clients.
#[derive(Clone)]
pub struct ErrorHandler {
    /// Whether to include error details in the response body.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Convert an error to a response.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();
        let code = err.code();
        let message = if self.include_details || !status.is_server_error() {
            err.message()
        }
        else {
            "Internal server error".to_string()
        };

        let body = ApiResponse::<()>::error(code, message);

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(
                serde_json::to_string(&body).unwrap_or_default(),
            ))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }
        ErrorHandler::new(false).to_response(&self)
    }
}

/// Middleware helper for request logging.
#[derive(Clone)]
pub struct RequestLogger {
    /// Skip logging for these path prefixes.
    pub skip_paths: Vec<&'static str>,
}

impl RequestLogger {
    /// Create a new request logger.
    #[inline]
    pub fn new() -> Self {
        Self {
            skip_paths: vec!["/health"],
        }
    }

    /// Check if a path should be skipped.
    pub fn should_skip(&self, path: &str) -> bool { self.skip_paths.iter().any(|p| path.starts_with(p)) }
}

impl Default for RequestLogger {
    fn default() -> Self { Self::new() }
}
