//! # CSRF Enforcement Middleware
//!
//! Double-submit protection for state-changing requests. The client
//! fetches a per-session token from `GET /api/v1/auth/csrf` and echoes it
//! in the `x-csrf-token` header; the comparison against the stored token
//! is constant-time.

use auth::verify_csrf_token;
use axum::{extract::Request, middleware::Next, response::Response};
use error::AppError;
use http::Method;

use crate::{middleware::AuthSession, ServerResult};

/// Header carrying the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Whether a method is exempt from CSRF checks.
fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Middleware rejecting mutating requests without a matching CSRF token.
/// Runs after [`crate::middleware::require_session`].
///
/// # Errors
///
/// Returns 403 when the header is missing, no token has been issued for
/// the session, or the tokens do not match.
pub async fn require_csrf(request: Request, next: Next) -> ServerResult<Response> {
    if is_safe_method(request.method()) {
        return Ok(next.run(request).await);
    }

    let auth = request
        .extensions()
        .get::<AuthSession>()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    let provided = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok());

    let valid = match (auth.csrf_token.as_deref(), provided) {
        (Some(expected), Some(provided)) => verify_csrf_token(expected, provided),
        _ => false,
    };

    if !valid {
        logging::log_security_event!("csrf_rejected", auth.user_id, request.uri().path());
        return Err(AppError::forbidden("CSRF token missing or invalid"));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_methods_exempt() {
        assert!(is_safe_method(&Method::GET));
        assert!(is_safe_method(&Method::HEAD));
        assert!(is_safe_method(&Method::OPTIONS));
    }

    #[test]
    fn test_mutating_methods_checked() {
        assert!(!is_safe_method(&Method::POST));
        assert!(!is_safe_method(&Method::PUT));
        assert!(!is_safe_method(&Method::DELETE));
        assert!(!is_safe_method(&Method::PATCH));
    }
}
