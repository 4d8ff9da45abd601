//! # Profile Handlers
//!
//! Self-service view and update of the caller's own account, plus
//! password change with a current-password check. A password change
//! revokes every other session of the account.

use axum::{
    extract::{Extension, State},
    Json,
};
use chrono::Utc;
use error::{ApiResponse, AppError};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

use crate::{
    dto::auth::{ChangePasswordRequest, UpdateProfileRequest, UserResponse},
    middleware::AuthSession,
    AppState,
    ServerResult,
};

/// `GET /api/v1/profile`
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> ServerResult<Json<ApiResponse<UserResponse>>> {
    let user = load_user(&state, &auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// `PUT /api/v1/profile`
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ServerResult<Json<ApiResponse<UserResponse>>> {
    let user = update_profile_inner(&state, &auth, payload).await?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn update_profile_inner(
    state: &AppState,
    auth: &AuthSession,
    payload: UpdateProfileRequest,
) -> ServerResult<UserResponse> {
    payload.validate()?;
    let user = load_user(state, auth).await?;

    let mut active: entity::users::ActiveModel = user.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    active.updated_at = Set(Utc::now());

    let user = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Updating profile"))?;

    Ok(UserResponse::from(user))
}

/// `PUT /api/v1/profile/password`
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ServerResult<Json<ApiResponse<()>>> {
    change_password_inner(&state, &auth, payload).await?;
    Ok(Json(ApiResponse::empty()))
}

pub async fn change_password_inner(
    state: &AppState,
    auth: &AuthSession,
    payload: ChangePasswordRequest,
) -> ServerResult<()> {
    payload.validate()?;
    let user = load_user(state, auth).await?;

    let current = SecretString::from(payload.current_password);
    if auth::verify_password(&current, &user.password_hash).is_err() {
        logging::log_security_event!("password_change_rejected", auth.user_id, "current password mismatch");
        return Err(AppError::unauthorized("Current password is incorrect"));
    }

    if let Err(problems) = auth::validate_password_strength(&payload.new_password) {
        let messages: Vec<String> = problems.iter().map(ToString::to_string).collect();
        return Err(AppError::validation(messages.join("; ")));
    }

    let new_password = SecretString::from(payload.new_password);
    let password_hash = auth::hash_password(&new_password, None)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let mut active: entity::users::ActiveModel = user.into();
    active.password_hash = Set(password_hash.expose_secret().to_string());
    active.updated_at = Set(Utc::now());
    active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Changing password"))?;

    // Revoke every other session of this account.
    entity::sessions::Entity::delete_many()
        .filter(entity::sessions::Column::UserId.eq(auth.user_id))
        .filter(entity::sessions::Column::Id.ne(auth.session_id))
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Revoking other sessions"))?;

    logging::log_auth_event!("password_change", auth.user_id, true);
    Ok(())
}

async fn load_user(state: &AppState, auth: &AuthSession) -> ServerResult<entity::users::Model> {
    entity::users::Entity::find_by_id(auth.user_id)
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading account"))?
        .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
}
