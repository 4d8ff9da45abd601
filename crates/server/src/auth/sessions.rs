//! # Session Persistence
//!
//! Database-backed sessions. Rows hold only the SHA-256 hash of the
//! session token; the raw token exists in the login response and the
//! client cookie. CSRF tokens are minted lazily, once per session.

use auth::{generate_csrf_token, generate_session_token, hash_session_token};
use chrono::{Duration, Utc};
use error::AppError;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::Set,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    ModelTrait,
    QueryFilter,
};
use uuid::Uuid;

use crate::ServerResult;

/// Creates a session row for a user and returns it with the raw token.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn create_session<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    ttl_hours: i64,
) -> ServerResult<(entity::sessions::Model, String)> {
    let token = generate_session_token();
    let now = Utc::now();

    let session = entity::sessions::ActiveModel {
        id:           Set(Uuid::new_v4()),
        user_id:      Set(user_id),
        token_hash:   Set(token.hash.clone()),
        csrf_token:   Set(None),
        created_at:   Set(now),
        expires_at:   Set(now + Duration::hours(ttl_hours)),
        last_seen_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(|e| AppError::database(e.to_string()).context("Creating session"))?;

    Ok((session, token.raw().to_string()))
}

/// Resolves a raw session token to its session and user. Expired sessions
/// are removed and treated as absent; valid sessions get their
/// `last_seen_at` refreshed.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub async fn find_session<C: ConnectionTrait>(
    db: &C,
    raw_token: &str,
) -> ServerResult<Option<(entity::sessions::Model, entity::users::Model)>> {
    let token_hash = hash_session_token(raw_token);

    let Some(session) = entity::sessions::Entity::find()
        .filter(entity::sessions::Column::TokenHash.eq(&token_hash))
        .one(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Looking up session"))?
    else {
        return Ok(None);
    };

    let now = Utc::now();
    if session.is_expired(now) {
        session
            .delete(db)
            .await
            .map_err(|e| AppError::database(e.to_string()).context("Deleting expired session"))?;
        return Ok(None);
    }

    let Some(user) = entity::users::Entity::find_by_id(session.user_id)
        .one(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading session user"))?
    else {
        return Ok(None);
    };

    let mut active: entity::sessions::ActiveModel = session.clone().into();
    active.last_seen_at = Set(now);
    let session = active
        .update(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Refreshing session"))?;

    Ok(Some((session, user)))
}

/// Returns the session's CSRF token, minting and persisting one on first
/// use.
///
/// # Errors
///
/// Returns an error if the session is gone or the update fails.
pub async fn ensure_csrf_token<C: ConnectionTrait>(db: &C, session_id: Uuid) -> ServerResult<String> {
    let session = entity::sessions::Entity::find_by_id(session_id)
        .one(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading session"))?
        .ok_or_else(|| AppError::unauthorized("Session no longer exists"))?;

    if let Some(token) = session.csrf_token.clone() {
        return Ok(token);
    }

    let token = generate_csrf_token();
    let mut active: entity::sessions::ActiveModel = session.into();
    active.csrf_token = Set(Some(token.clone()));
    active
        .update(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Storing CSRF token"))?;

    Ok(token)
}

/// Deletes a session by id. Deleting an absent session is not an error.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub async fn delete_session<C: ConnectionTrait>(db: &C, session_id: Uuid) -> ServerResult<()> {
    entity::sessions::Entity::delete_by_id(session_id)
        .exec(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Deleting session"))?;
    Ok(())
}

/// Removes all expired sessions and returns the number deleted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub async fn purge_expired<C: ConnectionTrait>(db: &C) -> ServerResult<u64> {
    let result = entity::sessions::Entity::delete_many()
        .filter(entity::sessions::Column::ExpiresAt.lte(Utc::now()))
        .exec(db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Purging expired sessions"))?;
    Ok(result.rows_affected)
}
