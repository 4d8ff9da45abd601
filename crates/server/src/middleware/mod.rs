//! # Request Middleware
//!
//! Session authentication, CSRF enforcement, and request tracking layers.

pub mod auth;
pub mod csrf;
pub mod tracking;

pub use auth::{require_admin, require_session, AuthSession, SESSION_COOKIE};
pub use csrf::require_csrf;
pub use tracking::track_requests;
