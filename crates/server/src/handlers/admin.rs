//! # Administration Handlers
//!
//! Cross-account oversight: account moderation, mission approval, and
//! report review. These are the only handlers that read rows without a
//! `user_id` scope; the router gates the whole tree behind the admin
//! role. Every transition is guarded by the document's state machine,
//! so replaying an action against a terminal row fails instead of
//! silently rewriting it.

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::Utc;
use entity::{
    mission_authorizations::MissionStatus,
    reports::ReportStatus,
    users::UserStatus,
};
use error::{ApiResponse, AppError, PaginationMeta};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        admin::{
            AdminMissionResponse,
            AdminReportQuery,
            AdminReportResponse,
            AdminUserQuery,
            ApproveMissionRequest,
            ReportAction,
            ReportActionRequest,
            UserAction,
            UserActionRequest,
        },
        auth::UserResponse,
        missions::{MissionListQuery, MissionResponse},
        reports::ReportResponse,
        ListQuery,
    },
    handlers::{missions, reports},
    middleware::AuthSession,
    AppState,
    ServerResult,
};

/// Parses an account status filter value.
fn parse_user_status(value: &str) -> ServerResult<UserStatus> {
    match value {
        "pending" => Ok(UserStatus::Pending),
        "active" => Ok(UserStatus::Active),
        "rejected" => Ok(UserStatus::Rejected),
        "suspended" => Ok(UserStatus::Suspended),
        other => Err(AppError::validation(format!("Unknown account status '{other}'"))),
    }
}

/// `GET /api/v1/admin/users`
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<AdminUserQuery>,
    Query(query): Query<ListQuery>,
) -> ServerResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let mut scope = entity::users::Entity::find();
    if let Some(status) = filter.status.as_deref() {
        scope = scope.filter(entity::users::Column::Status.eq(parse_user_status(status)?));
    }

    let total = scope
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting accounts"))?;

    let pagination = PaginationMeta::new(query.page, query.per_page, total);
    let offset = pagination
        .offset()
        .ok_or_else(|| AppError::bad_request("Page number out of range"))?;

    let users = scope
        .order_by_desc(entity::users::Column::CreatedAt)
        .offset(offset)
        .limit(pagination.limit())
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Listing accounts"))?;

    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, pagination)))
}

/// `POST /api/v1/admin/users/:id/action`
pub async fn user_action(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserActionRequest>,
) -> ServerResult<Json<ApiResponse<UserResponse>>> {
    let user = user_action_inner(&state, &auth, id, payload).await?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn user_action_inner(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
    payload: UserActionRequest,
) -> ServerResult<UserResponse> {
    payload.validate()?;
    let action =
        UserAction::parse(&payload.action).map_err(|name| AppError::validation(format!("Unknown action '{name}'")))?;

    if id == auth.user_id {
        return Err(AppError::conflict("Cannot moderate your own account"));
    }

    let user = entity::users::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading account"))?
        .ok_or_else(|| AppError::not_found("Account not found"))?;

    let new_status = match (action, user.status) {
        (UserAction::Approve, UserStatus::Pending | UserStatus::Suspended) => UserStatus::Active,
        (UserAction::Reject, UserStatus::Pending) => UserStatus::Rejected,
        (UserAction::Suspend, UserStatus::Active) => UserStatus::Suspended,
        (_, status) => {
            return Err(AppError::conflict(format!(
                "Action '{}' is not legal for an account in status '{status}'",
                payload.action
            )));
        },
    };

    let mut active: entity::users::ActiveModel = user.into();
    active.status = Set(new_status);
    active.updated_at = Set(Utc::now());
    let user = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Updating account status"))?;

    // A suspension takes effect immediately.
    if new_status == UserStatus::Suspended {
        entity::sessions::Entity::delete_many()
            .filter(entity::sessions::Column::UserId.eq(user.id))
            .exec(&state.db)
            .await
            .map_err(|e| AppError::database(e.to_string()).context("Revoking sessions"))?;
    }

    logging::log_auth_event!(format!("account_{}", payload.action), user.id, true);
    Ok(UserResponse::from(user))
}

/// `GET /api/v1/admin/missions`
pub async fn list_missions(
    State(state): State<AppState>,
    Query(filter): Query<MissionListQuery>,
    Query(query): Query<ListQuery>,
) -> ServerResult<Json<ApiResponse<Vec<AdminMissionResponse>>>> {
    let mut scope = entity::mission_authorizations::Entity::find();
    if let Some(status) = filter.status.as_deref() {
        scope = scope.filter(entity::mission_authorizations::Column::Status.eq(missions::parse_status(status)?));
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

    let rows = scope
        .order_by_desc(entity::mission_authorizations::Column::CreatedAt)
        .offset(offset)
        .limit(pagination.limit())
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Listing missions"))?;

    let data = rows
        .into_iter()
        .map(|mission| AdminMissionResponse {
            user_id: mission.user_id,
            mission: MissionResponse::from(mission),
        })
        .collect();
    Ok(Json(ApiResponse::paginated(data, pagination)))
}

/// `POST /api/v1/admin/missions/:id/approve`
pub async fn approve_mission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApproveMissionRequest>,
) -> ServerResult<Json<ApiResponse<MissionResponse>>> {
    let mission = approve_mission_inner(&state, &auth, id, payload).await?;
    Ok(Json(ApiResponse::ok(mission)))
}

pub async fn approve_mission_inner(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
    payload: ApproveMissionRequest,
) -> ServerResult<MissionResponse> {
    payload.validate()?;

    let mission = entity::mission_authorizations::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading mission"))?
        .ok_or_else(|| AppError::not_found("Mission authorization not found"))?;

    if !mission.status.can_approve() {
        return Err(AppError::conflict(format!(
            "Mission in status '{}' cannot be approved",
            mission.status
        )));
    }

    let mut active: entity::mission_authorizations::ActiveModel = mission.into();
    active.status = Set(MissionStatus::Approved);
    active.authorized_by = Set(Some(payload.authorized_by));
    active.authorized_by_position = Set(Some(payload.authorized_by_position));
    active.authorization_date = Set(Some(payload.authorization_date.unwrap_or_else(|| Utc::now().date_naive())));
    active.updated_at = Set(Utc::now());

    let mission = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Approving mission"))?;

    tracing::info!(admin_id = %auth.user_id, number = %mission.authorization_number, "Mission approved");
    Ok(MissionResponse::from(mission))
}

/// `GET /api/v1/admin/reports`
pub async fn list_reports(
    State(state): State<AppState>,
    Query(filter): Query<AdminReportQuery>,
    Query(query): Query<ListQuery>,
) -> ServerResult<Json<ApiResponse<Vec<AdminReportResponse>>>> {
    let mut scope = entity::reports::Entity::find();
    if let Some(status) = filter.status.as_deref() {
        scope = scope.filter(entity::reports::Column::Status.eq(reports::parse_status(status)?));
    }
    if let Some(report_type) = filter.report_type.as_deref() {
        scope = scope.filter(entity::reports::Column::ReportType.eq(reports::parse_type(report_type)?));
    }

    let total = scope
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting reports"))?;

    let pagination = PaginationMeta::new(query.page, query.per_page, total);
    let offset = pagination
        .offset()
        .ok_or_else(|| AppError::bad_request("Page number out of range"))?;

    let rows = scope
        .order_by_desc(entity::reports::Column::CreatedAt)
        .offset(offset)
        .limit(pagination.limit())
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Listing reports"))?;

    let data = rows
        .into_iter()
        .map(|report| AdminReportResponse {
            user_id: report.user_id,
            report:  ReportResponse::from(report),
        })
        .collect();
    Ok(Json(ApiResponse::paginated(data, pagination)))
}

/// `POST /api/v1/admin/reports/:id/action`
pub async fn report_action(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReportActionRequest>,
) -> ServerResult<Json<ApiResponse<ReportResponse>>> {
    let report = report_action_inner(&state, &auth, id, payload).await?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn report_action_inner(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
    payload: ReportActionRequest,
) -> ServerResult<ReportResponse> {
    payload.validate()?;
    let action = ReportAction::parse(&payload.action)
        .map_err(|name| AppError::validation(format!("Unknown action '{name}'")))?;

    if action == ReportAction::Reject && payload.notes.as_deref().unwrap_or("").trim().is_empty() {
        return Err(AppError::validation("Rejection requires review notes"));
    }

    let report = entity::reports::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading report"))?
        .ok_or_else(|| AppError::not_found("Report not found"))?;

    if !report.status.can_review() {
        return Err(AppError::conflict(format!(
            "Report in status '{}' cannot be reviewed",
            report.status
        )));
    }

    let now = Utc::now();
    let mut active: entity::reports::ActiveModel = report.into();
    active.status = Set(match action {
        ReportAction::Approve => ReportStatus::Approved,
        ReportAction::Reject => ReportStatus::Rejected,
    });
    active.reviewed_by = Set(Some(auth.user_id));
    active.review_notes = Set(payload.notes);
    active.reviewed_at = Set(Some(now));
    active.updated_at = Set(now);

    let report = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Recording review decision"))?;

    tracing::info!(admin_id = %auth.user_id, number = %report.report_number, decision = %payload.action, "Report reviewed");
    Ok(ReportResponse::from(report))
}
