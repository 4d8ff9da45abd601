//! # Mission Authorization Handlers
//!
//! Account-scoped workflow over mission authorizations. Numbers are
//! allocated optimistically against the unique index; updates and
//! deletes are legal only in `draft`; the printable document is
//! available only once approved.

use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use entity::mission_authorizations::MissionStatus;
use error::{ApiResponse, AppError, PaginationMeta};
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        missions::{
            CreateMissionRequest,
            MissionDocumentResponse,
            MissionListQuery,
            MissionResponse,
            MissionStatsResponse,
            UpdateMissionRequest,
        },
        ListQuery,
    },
    handlers::members::find_owned_member,
    middleware::AuthSession,
    numbering,
    AppState,
    ServerResult,
};

/// Inclusive trip duration in days.
///
/// # Errors
///
/// Returns a validation error when the return date precedes departure.
pub fn trip_duration_days(departure: NaiveDate, ret: NaiveDate) -> ServerResult<i32> {
    if ret < departure {
        return Err(AppError::validation("Return date cannot precede departure date"));
    }
    let days = (ret - departure).num_days() + 1;
    i32::try_from(days).map_err(|_| AppError::validation("Trip duration out of range"))
}

/// Parses a mission status filter value.
pub(crate) fn parse_status(value: &str) -> ServerResult<MissionStatus> {
    match value {
        "draft" => Ok(MissionStatus::Draft),
        "pending" => Ok(MissionStatus::Pending),
        "approved" => Ok(MissionStatus::Approved),
        "rejected" => Ok(MissionStatus::Rejected),
        "completed" => Ok(MissionStatus::Completed),
        other => Err(AppError::validation(format!("Unknown mission status '{other}'"))),
    }
}

/// `POST /api/v1/missions`
pub async fn create_mission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(payload): Json<CreateMissionRequest>,
) -> ServerResult<impl IntoResponse> {
    let mission = create_mission_inner(&state, &auth, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(mission))))
}

pub async fn create_mission_inner(
    state: &AppState,
    auth: &AuthSession,
    payload: CreateMissionRequest,
) -> ServerResult<MissionResponse> {
    payload.validate()?;

    let member = find_owned_member(state, auth, payload.member_id).await?;
    let duration_days = trip_duration_days(payload.departure_date, payload.return_date)?;
    let today = Utc::now().date_naive();

    let mut last_err = AppError::internal("Authorization number allocation failed");
    for _ in 0..numbering::MAX_NUMBER_ATTEMPTS {
        let number = numbering::next_authorization_number(&state.db, today).await?;
        let now = Utc::now();

        let result = entity::mission_authorizations::ActiveModel {
            id:                     Set(Uuid::new_v4()),
            user_id:                Set(auth.user_id),
            member_id:              Set(member.id),
            authorization_number:   Set(number.clone()),
            purpose:                Set(payload.purpose.clone()),
            destination:            Set(payload.destination.clone()),
            departure_date:         Set(payload.departure_date),
            return_date:            Set(payload.return_date),
            duration_days:          Set(duration_days),
            status:                 Set(MissionStatus::Draft),
            authorized_by:          Set(None),
            authorized_by_position: Set(None),
            authorization_date:     Set(None),
            created_at:             Set(now),
            updated_at:             Set(now),
        }
        .insert(&state.db)
        .await;

        match result {
            Ok(mission) => {
                tracing::info!(user_id = %auth.user_id, number = %mission.authorization_number, "Mission created");
                return Ok(MissionResponse::from(mission));
            },
            Err(e) => {
                let err = AppError::from(e);
                if err.is_unique_violation() {
                    tracing::debug!(number = %number, "Authorization number taken, retrying");
                    last_err = err;
                    continue;
                }
                return Err(err.context("Creating mission"));
            },
        }
    }

    Err(last_err.context("Allocating authorization number"))
}

/// `GET /api/v1/missions`
pub async fn list_missions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(filter): Query<MissionListQuery>,
    Query(query): Query<ListQuery>,
) -> ServerResult<Json<ApiResponse<Vec<MissionResponse>>>> {
    let mut scope = entity::mission_authorizations::Entity::find()
        .filter(entity::mission_authorizations::Column::UserId.eq(auth.user_id));
    if let Some(status) = filter.status.as_deref() {
        scope = scope.filter(entity::mission_authorizations::Column::Status.eq(parse_status(status)?));
    }

    let total = scope
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting missions"))?;

    let pagination = PaginationMeta::new(query.page, query.per_page, total);
    let offset = pagination
        .offset()
        .ok_or_else(|| AppError::bad_request("Page number out of range"))?;

    let missions = scope
        .order_by_desc(entity::mission_authorizations::Column::CreatedAt)
        .offset(offset)
        .limit(pagination.limit())
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Listing missions"))?;

    let data = missions.into_iter().map(MissionResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, pagination)))
}

/// `GET /api/v1/missions/:id`
pub async fn get_mission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<MissionResponse>>> {
    let mission = find_owned_mission(&state, &auth, id).await?;
    Ok(Json(ApiResponse::ok(MissionResponse::from(mission))))
}

/// `PUT /api/v1/missions/:id` (draft only)
pub async fn update_mission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMissionRequest>,
) -> ServerResult<Json<ApiResponse<MissionResponse>>> {
    let mission = update_mission_inner(&state, &auth, id, payload).await?;
    Ok(Json(ApiResponse::ok(mission)))
}

pub async fn update_mission_inner(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
    payload: UpdateMissionRequest,
) -> ServerResult<MissionResponse> {
    payload.validate()?;
    let mission = find_owned_mission(state, auth, id).await?;

    if !mission.status.is_editable() {
        return Err(AppError::conflict(format!(
            "Mission in status '{}' cannot be edited",
            mission.status
        )));
    }

    let departure = payload.departure_date.unwrap_or(mission.departure_date);
    let ret = payload.return_date.unwrap_or(mission.return_date);
    let duration_days = trip_duration_days(departure, ret)?;

    let member_id = match payload.member_id {
        Some(member_id) => find_owned_member(state, auth, member_id).await?.id,
        None => mission.member_id,
    };

    let mut active: entity::mission_authorizations::ActiveModel = mission.into();
    active.member_id = Set(member_id);
    if let Some(purpose) = payload.purpose {
        active.purpose = Set(purpose);
    }
    if let Some(destination) = payload.destination {
        active.destination = Set(destination);
    }
    active.departure_date = Set(departure);
    active.return_date = Set(ret);
    active.duration_days = Set(duration_days);
    active.updated_at = Set(Utc::now());

    let mission = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Updating mission"))?;

    Ok(MissionResponse::from(mission))
}

/// `DELETE /api/v1/missions/:id` (draft only)
pub async fn delete_mission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<()>>> {
    delete_mission_inner(&state, &auth, id).await?;
    Ok(Json(ApiResponse::empty()))
}

pub async fn delete_mission_inner(state: &AppState, auth: &AuthSession, id: Uuid) -> ServerResult<()> {
    let mission = find_owned_mission(state, auth, id).await?;

    if !mission.status.is_editable() {
        return Err(AppError::conflict(format!(
            "Mission in status '{}' cannot be deleted",
            mission.status
        )));
    }

    entity::mission_authorizations::Entity::delete_by_id(mission.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Deleting mission"))?;

    Ok(())
}

/// `GET /api/v1/missions/:id/document` (approved only)
pub async fn mission_document(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<MissionDocumentResponse>>> {
    let document = mission_document_inner(&state, &auth, id).await?;
    Ok(Json(ApiResponse::ok(document)))
}

pub async fn mission_document_inner(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
) -> ServerResult<MissionDocumentResponse> {
    let mission = find_owned_mission(state, auth, id).await?;

    if mission.status != MissionStatus::Approved {
        return Err(AppError::conflict(
            "Authorization document is only available for approved missions",
        ));
    }

    let member = entity::members::Entity::find_by_id(mission.member_id)
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading mission member"))?
        .ok_or_else(|| AppError::not_found("Member not found"))?;

    Ok(MissionDocumentResponse {
        authorization_number:   mission.authorization_number,
        member_name:            member.full_name(),
        member_position:        member.position,
        member_department:      member.department,
        purpose:                mission.purpose,
        destination:            mission.destination,
        departure_date:         mission.departure_date,
        return_date:            mission.return_date,
        duration_days:          mission.duration_days,
        authorized_by:          mission.authorized_by,
        authorized_by_position: mission.authorized_by_position,
        authorization_date:     mission.authorization_date,
    })
}

/// `GET /api/v1/missions/stats`
pub async fn mission_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> ServerResult<Json<ApiResponse<MissionStatsResponse>>> {
    let stats = mission_stats_inner(&state, &auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn mission_stats_inner(state: &AppState, auth: &AuthSession) -> ServerResult<MissionStatsResponse> {
    let scoped = || {
        entity::mission_authorizations::Entity::find()
            .filter(entity::mission_authorizations::Column::UserId.eq(auth.user_id))
    };
    let count_status = |status: MissionStatus| {
        scoped()
            .filter(entity::mission_authorizations::Column::Status.eq(status))
            .count(&state.db)
    };

    let total = scoped()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting missions"))?;
    let draft = count_status(MissionStatus::Draft)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting draft missions"))?;
    let pending = count_status(MissionStatus::Pending)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting pending missions"))?;
    let approved = count_status(MissionStatus::Approved)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting approved missions"))?;

    let today = Utc::now().date_naive();
    let upcoming = scoped()
        .filter(entity::mission_authorizations::Column::DepartureDate.gte(today))
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting upcoming missions"))?;

    Ok(MissionStatsResponse {
        total,
        draft,
        pending,
        approved,
        upcoming,
    })
}

/// Loads a mission owned by the caller; anything else is a 404.
pub async fn find_owned_mission(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
) -> ServerResult<entity::mission_authorizations::Model> {
    entity::mission_authorizations::Entity::find_by_id(id)
        .filter(entity::mission_authorizations::Column::UserId.eq(auth.user_id))
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading mission"))?
        .ok_or_else(|| AppError::not_found("Mission authorization not found"))
}
