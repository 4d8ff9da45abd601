//! # Session Authentication Middleware
//!
//! Resolves the session cookie to an account on every protected request
//! and injects an [`AuthSession`] into the request extensions. Handlers
//! take the session as an `Extension` and never consult globals.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use entity::users::{UserRole, UserStatus};
use error::AppError;
use uuid::Uuid;

use crate::{auth::sessions, AppState, ServerResult};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "waypoint_session";

/// The authenticated caller, attached to request extensions.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Account id
    pub user_id:      Uuid,
    /// Account email
    pub email:        String,
    /// Full display name
    pub display_name: String,
    /// Account role
    pub role:         UserRole,
    /// Backing session row id
    pub session_id:   Uuid,
    /// CSRF token stored on the session, if one has been issued
    pub csrf_token:   Option<String>,
}

impl AuthSession {
    /// Whether the caller holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool { self.role == UserRole::Admin }
}

/// Extracts a named cookie value from the `Cookie` header.
fn cookie_value<'a>(headers: &'a http::HeaderMap, name: &str) -> Option<&'a str> {
    let header = headers.get(http::header::COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Middleware enforcing a valid, unexpired session on an active account.
///
/// # Errors
///
/// Returns 401 when the cookie is missing, the session is unknown or
/// expired, or the account is no longer active.
pub async fn require_session(State(state): State<AppState>, mut request: Request, next: Next) -> ServerResult<Response> {
    let token = cookie_value(request.headers(), SESSION_COOKIE)
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?
        .to_string();

    let (session, user) = sessions::find_session(&state.db, &token)
        .await?
        .ok_or_else(|| AppError::unauthorized("Session is invalid or expired"))?;

    if user.status != UserStatus::Active {
        logging::log_security_event!("inactive_account_session", user.id, user.status);
        return Err(AppError::unauthorized("Account is not active"));
    }

    let auth = AuthSession {
        user_id:      user.id,
        email:        user.email.clone(),
        display_name: user.display_name(),
        role:         user.role,
        session_id:   session.id,
        csrf_token:   session.csrf_token.clone(),
    };
    request.extensions_mut().insert(auth);

    Ok(next.run(request).await)
}

/// Middleware restricting a route tree to admin accounts. Runs after
/// [`require_session`], which installs the [`AuthSession`] extension.
///
/// # Errors
///
/// Returns 403 when the caller is not an admin.
pub async fn require_admin(request: Request, next: Next) -> ServerResult<Response> {
    let auth = request
        .extensions()
        .get::<AuthSession>()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    if !auth.is_admin() {
        logging::log_security_event!("admin_route_denied", auth.user_id, auth.role);
        return Err(AppError::forbidden("Administrator access required"));
    }

    Ok(next.run(request).await)
}
