//! # Rejection Handlers
//!
//! Custom rejection handlers for converting Axum extractor rejections into
//! the standard API error format.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Handle JSON deserialization errors.
///
/// Catches errors like "missing field `purpose`" and rewrites them into a
/// friendlier message in the standard error envelope.
pub fn handle_json_rejection(rejection: JsonRejection) -> Response {
    let raw = rejection.to_string();

    let message = match extract_missing_field(&raw) {
        Some(field) => format!("Missing required field: {}", field),
        None => raw,
    };

    let body = json!({
        "status": "error",
        "code": "BAD_REQUEST",
        "message": message,
    });

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// Handle query string deserialization errors.
pub fn handle_query_rejection(rejection: QueryRejection) -> Response {
    let body = json!({
        "status": "error",
        "code": "BAD_REQUEST",
        "message": format!("Invalid query string: {}", rejection),
    });

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// Pull the field name out of serde's "missing field `name`" wording.
fn extract_missing_field(message: &str) -> Option<&str> {
    let rest = message.split("missing field `").nth(1)?;
    rest.split('`').next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_missing_field() {
        let msg = "Failed to deserialize the JSON body: missing field `purpose` at line 1 column 42";
        assert_eq!(extract_missing_field(msg), Some("purpose"));
    }

    #[test]
    fn test_extract_missing_field_absent() {
        assert_eq!(extract_missing_field("expected value at line 1"), None);
    }
}
