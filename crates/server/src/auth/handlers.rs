//! # Authentication Handlers
//!
//! Registration, login, logout, and CSRF token issuance. New accounts
//! start in `pending` and cannot log in until an admin approves them;
//! login failures name the account status so applicants are not told
//! their password was wrong.

use axum::{
    extract::{Extension, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use entity::users::{UserRole, UserStatus};
use error::{ApiResponse, AppError};
use http::{header, StatusCode};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::sessions,
    dto::auth::{CsrfResponse, LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    middleware::{AuthSession, SESSION_COOKIE},
    AppState,
    ServerResult,
};

/// `POST /api/v1/auth/register`
pub async fn register(State(state): State<AppState>, Json(payload): Json<RegisterRequest>) -> ServerResult<impl IntoResponse> {
    let user = register_inner(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

pub async fn register_inner(state: &AppState, payload: RegisterRequest) -> ServerResult<UserResponse> {
    payload.validate()?;

    if let Err(problems) = auth::validate_password_strength(&payload.password) {
        let messages: Vec<String> = problems.iter().map(ToString::to_string).collect();
        return Err(AppError::validation(messages.join("; ")));
    }

    let existing = entity::users::Entity::find()
        .filter(entity::users::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Checking email uniqueness"))?;
    if existing.is_some() {
        return Err(AppError::conflict("Email is already registered"));
    }

    let password = SecretString::from(payload.password);
    let password_hash = auth::hash_password(&password, None)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let now = Utc::now();
    let user = entity::users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        email:         Set(payload.email),
        password_hash: Set(password_hash.expose_secret().to_string()),
        first_name:    Set(payload.first_name),
        last_name:     Set(payload.last_name),
        phone:         Set(payload.phone),
        role:          Set(UserRole::Member),
        status:        Set(UserStatus::Pending),
        last_login_at: Set(None),
        created_at:    Set(now),
        updated_at:    Set(now),
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::database(e.to_string()).context("Creating account"))?;

    logging::log_auth_event!("register", user.id, true);
    Ok(UserResponse::from(user))
}

/// `POST /api/v1/auth/login`
pub async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> ServerResult<impl IntoResponse> {
    let (response, cookie) = login_inner(&state, payload).await?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::ok(response)),
    ))
}

pub async fn login_inner(state: &AppState, payload: LoginRequest) -> ServerResult<(LoginResponse, String)> {
    payload.validate()?;

    let Some(user) = entity::users::Entity::find()
        .filter(entity::users::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Looking up account"))?
    else {
        return Err(AppError::unauthorized("Invalid email or password"));
    };

    let password = SecretString::from(payload.password);
    if auth::verify_password(&password, &user.password_hash).is_err() {
        logging::log_auth_event!("login", user.id, false);
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    // The password checked out, so the caller owns the account and may be
    // told why it cannot be used.
    match user.status {
        UserStatus::Active => {},
        UserStatus::Pending => return Err(AppError::unauthorized("Account is awaiting approval")),
        UserStatus::Rejected => return Err(AppError::unauthorized("Account registration was rejected")),
        UserStatus::Suspended => return Err(AppError::unauthorized("Account is suspended")),
    }

    let (_session, raw_token) = sessions::create_session(&state.db, user.id, state.config.session_ttl_hours).await?;

    let mut active: entity::users::ActiveModel = user.clone().into();
    active.last_login_at = Set(Some(Utc::now()));
    let user = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Recording login time"))?;

    logging::log_auth_event!("login", user.id, true);

    let cookie = session_cookie(&raw_token, state.config.session_ttl_hours * 3600);
    Ok((
        LoginResponse {
            token: raw_token,
            user:  UserResponse::from(user),
        },
        cookie,
    ))
}

/// `POST /api/v1/auth/logout`
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> ServerResult<impl IntoResponse> {
    sessions::delete_session(&state.db, auth.session_id).await?;
    logging::log_auth_event!("logout", auth.user_id, true);

    Ok((
        [(header::SET_COOKIE, session_cookie("", 0))],
        Json(ApiResponse::<()>::empty()),
    ))
}

/// `GET /api/v1/auth/csrf`
pub async fn csrf(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> ServerResult<Json<ApiResponse<CsrfResponse>>> {
    let csrf_token = sessions::ensure_csrf_token(&state.db, auth.session_id).await?;
    Ok(Json(ApiResponse::ok(CsrfResponse {
        csrf_token,
    })))
}

/// Builds the session cookie header value.
fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={max_age_secs}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok123", 86400);
        assert!(cookie.starts_with("waypoint_session=tok123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn test_logout_cookie_clears_session() {
        let cookie = session_cookie("", 0);
        assert!(cookie.starts_with("waypoint_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
