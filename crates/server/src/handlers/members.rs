//! # Member Roster Handlers
//!
//! Account-scoped CRUD over member profiles. `employee_id` is unique
//! across the organization; deletion is soft via the `inactive` status.
//! Non-owned members read as 404 so ids cannot be probed.

use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use entity::members::MemberStatus;
use error::{ApiResponse, AppError, PaginationMeta};
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        members::{CreateMemberRequest, MemberResponse, UpdateMemberRequest},
        ListQuery,
    },
    middleware::AuthSession,
    AppState,
    ServerResult,
};

/// `POST /api/v1/members`
pub async fn create_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(payload): Json<CreateMemberRequest>,
) -> ServerResult<impl IntoResponse> {
    let member = create_member_inner(&state, &auth, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(member))))
}

pub async fn create_member_inner(
    state: &AppState,
    auth: &AuthSession,
    payload: CreateMemberRequest,
) -> ServerResult<MemberResponse> {
    payload.validate()?;

    let now = Utc::now();
    let result = entity::members::ActiveModel {
        id:          Set(Uuid::new_v4()),
        user_id:     Set(auth.user_id),
        first_name:  Set(payload.first_name),
        last_name:   Set(payload.last_name),
        middle_name: Set(payload.middle_name),
        email:       Set(payload.email),
        phone:       Set(payload.phone),
        position:    Set(payload.position),
        department:  Set(payload.department),
        employee_id: Set(payload.employee_id),
        status:      Set(MemberStatus::Active),
        created_at:  Set(now),
        updated_at:  Set(now),
    }
    .insert(&state.db)
    .await;

    match result {
        Ok(member) => Ok(MemberResponse::from(member)),
        Err(e) => {
            let err = AppError::from(e);
            if err.is_unique_violation() {
                return Err(AppError::conflict("Employee ID is already registered"));
            }
            Err(err.context("Creating member"))
        },
    }
}

/// `GET /api/v1/members`
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(query): Query<ListQuery>,
) -> ServerResult<Json<ApiResponse<Vec<MemberResponse>>>> {
    let scope = entity::members::Entity::find()
        .filter(entity::members::Column::UserId.eq(auth.user_id))
        .filter(entity::members::Column::Status.eq(MemberStatus::Active));

    let total = scope
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting members"))?;

    let pagination = PaginationMeta::new(query.page, query.per_page, total);
    let offset = pagination
        .offset()
        .ok_or_else(|| AppError::bad_request("Page number out of range"))?;

    let members = scope
        .order_by_asc(entity::members::Column::LastName)
        .offset(offset)
        .limit(pagination.limit())
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Listing members"))?;

    let data = members.into_iter().map(MemberResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, pagination)))
}

/// `GET /api/v1/members/:id`
pub async fn get_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<MemberResponse>>> {
    let member = find_owned_member(&state, &auth, id).await?;
    Ok(Json(ApiResponse::ok(MemberResponse::from(member))))
}

/// `PUT /api/v1/members/:id`
pub async fn update_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMemberRequest>,
) -> ServerResult<Json<ApiResponse<MemberResponse>>> {
    let member = update_member_inner(&state, &auth, id, payload).await?;
    Ok(Json(ApiResponse::ok(member)))
}

pub async fn update_member_inner(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
    payload: UpdateMemberRequest,
) -> ServerResult<MemberResponse> {
    payload.validate()?;
    let member = find_owned_member(state, auth, id).await?;

    let mut active: entity::members::ActiveModel = member.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(middle_name) = payload.middle_name {
        active.middle_name = Set(Some(middle_name));
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(position) = payload.position {
        active.position = Set(Some(position));
    }
    if let Some(department) = payload.department {
        active.department = Set(Some(department));
    }
    active.updated_at = Set(Utc::now());

    let member = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Updating member"))?;

    Ok(MemberResponse::from(member))
}

/// `DELETE /api/v1/members/:id` (soft delete)
pub async fn delete_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<()>>> {
    delete_member_inner(&state, &auth, id).await?;
    Ok(Json(ApiResponse::empty()))
}

pub async fn delete_member_inner(state: &AppState, auth: &AuthSession, id: Uuid) -> ServerResult<()> {
    let member = find_owned_member(state, auth, id).await?;

    let mut active: entity::members::ActiveModel = member.into();
    active.status = Set(MemberStatus::Inactive);
    active.updated_at = Set(Utc::now());
    active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Deactivating member"))?;

    Ok(())
}

/// Loads an active member owned by the caller; anything else is a 404.
pub async fn find_owned_member(state: &AppState, auth: &AuthSession, id: Uuid) -> ServerResult<entity::members::Model> {
    entity::members::Entity::find_by_id(id)
        .filter(entity::members::Column::UserId.eq(auth.user_id))
        .filter(entity::members::Column::Status.eq(MemberStatus::Active))
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading member"))?
        .ok_or_else(|| AppError::not_found("Member not found"))
}
