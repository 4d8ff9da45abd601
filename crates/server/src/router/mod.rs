//! # Router
//!
//! Route tables in tiers: public (registration, login, health), session
//! bootstrap (logout and CSRF issuance, session-only), session
//! (everything account-scoped, with CSRF enforcement on mutations), and
//! admin (oversight endpoints behind the role gate).

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    auth::handlers as auth_handlers,
    handlers::{admin, attachments, health, members, missions, profile, reports},
    middleware::{require_admin, require_csrf, require_session, track_requests},
    storage::MAX_ATTACHMENT_BYTES,
    AppState,
};

/// Headroom over the attachment cap for multipart framing.
const BODY_LIMIT: usize = MAX_ATTACHMENT_BYTES + 64 * 1024;

/// Public routes reachable without a session.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/register", post(auth_handlers::register))
        .route("/api/v1/auth/login", post(auth_handlers::login))
        .route("/health", get(health::health))
}

/// Session bootstrap routes: CSRF issuance and logout. Behind a session
/// but exempt from the CSRF check, since the client has no token yet.
fn session_bootstrap_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/logout", post(auth_handlers::logout))
        .route("/api/v1/auth/csrf", get(auth_handlers::csrf))
        .layer(middleware::from_fn_with_state(state, require_session))
}

/// Account-scoped routes behind a session; mutations also require the
/// CSRF header.
fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/profile", get(profile::get_profile).put(profile::update_profile))
        .route("/api/v1/profile/password", put(profile::change_password))
        .route("/api/v1/members", get(members::list_members).post(members::create_member))
        .route(
            "/api/v1/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route(
            "/api/v1/missions",
            get(missions::list_missions).post(missions::create_mission),
        )
        .route("/api/v1/missions/stats", get(missions::mission_stats))
        .route(
            "/api/v1/missions/:id",
            get(missions::get_mission)
                .put(missions::update_mission)
                .delete(missions::delete_mission),
        )
        .route("/api/v1/missions/:id/document", get(missions::mission_document))
        .route(
            "/api/v1/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route("/api/v1/reports/stats", get(reports::report_stats))
        .route(
            "/api/v1/reports/:id",
            get(reports::get_report)
                .put(reports::update_report)
                .delete(reports::delete_report),
        )
        .route("/api/v1/reports/:id/submit", post(reports::submit_report))
        .route(
            "/api/v1/reports/:id/attachments",
            post(attachments::upload_attachment).get(attachments::list_attachments),
        )
        .route("/api/v1/attachments/:id", delete(attachments::delete_attachment))
        .layer(middleware::from_fn(require_csrf))
        .layer(middleware::from_fn_with_state(state, require_session))
}

/// Oversight routes behind the admin role.
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/users/:id/action", post(admin::user_action))
        .route("/api/v1/admin/missions", get(admin::list_missions))
        .route("/api/v1/admin/missions/:id/approve", post(admin::approve_mission))
        .route("/api/v1/admin/reports", get(admin::list_reports))
        .route("/api/v1/admin/reports/:id/action", post(admin::report_action))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn(require_csrf))
        .layer(middleware::from_fn_with_state(state, require_session))
}

/// Builds the full application router.
#[must_use]
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(session_bootstrap_routes(state.clone()))
        .merge(session_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(middleware::from_fn(track_requests))
        .with_state(state)
}
