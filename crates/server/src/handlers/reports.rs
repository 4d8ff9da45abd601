//! # Report Handlers
//!
//! Account-scoped report workflow. A report can only be filed against a
//! mission the caller owns that is approved or completed. Content is
//! frozen outside `draft`/`rejected`; deletion removes attachment rows
//! and the report row in one transaction, with file cleanup afterwards
//! on a best-effort basis.

use axum::{
    extract::{Extension, Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use entity::reports::{ReportStatus, ReportType};
use error::{ApiResponse, AppError, PaginationMeta};
use http::StatusCode;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::Set,
    ColumnTrait,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        reports::{CreateReportRequest, ReportListQuery, ReportResponse, ReportStatsResponse, UpdateReportRequest},
        ListQuery,
    },
    handlers::missions::find_owned_mission,
    middleware::AuthSession,
    numbering,
    storage::AttachmentStorage,
    AppState,
    ServerResult,
};

/// Parses a report status filter value.
pub(crate) fn parse_status(value: &str) -> ServerResult<ReportStatus> {
    match value {
        "draft" => Ok(ReportStatus::Draft),
        "submitted" => Ok(ReportStatus::Submitted),
        "under-review" => Ok(ReportStatus::UnderReview),
        "approved" => Ok(ReportStatus::Approved),
        "rejected" => Ok(ReportStatus::Rejected),
        other => Err(AppError::validation(format!("Unknown report status '{other}'"))),
    }
}

/// Parses a report type value.
pub(crate) fn parse_type(value: &str) -> ServerResult<ReportType> {
    match value {
        "mission" => Ok(ReportType::Mission),
        "activity" => Ok(ReportType::Activity),
        other => Err(AppError::validation(format!("Unknown report type '{other}'"))),
    }
}

/// `POST /api/v1/reports`
pub async fn create_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Json(payload): Json<CreateReportRequest>,
) -> ServerResult<impl IntoResponse> {
    let report = create_report_inner(&state, &auth, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(report))))
}

pub async fn create_report_inner(
    state: &AppState,
    auth: &AuthSession,
    payload: CreateReportRequest,
) -> ServerResult<ReportResponse> {
    payload.validate()?;

    let submit_now = match payload.action.as_deref() {
        None | Some("draft") => false,
        Some("submit") => true,
        Some(other) => return Err(AppError::validation(format!("Unknown action '{other}'"))),
    };
    let report_type = match payload.report_type.as_deref() {
        None => ReportType::Mission,
        Some(value) => parse_type(value)?,
    };

    let mission = find_owned_mission(state, auth, payload.authorization_id).await?;
    if !mission.status.accepts_reports() {
        return Err(AppError::conflict(format!(
            "Reports cannot be filed against a mission in status '{}'",
            mission.status
        )));
    }

    let today = Utc::now().date_naive();
    let mut last_err = AppError::internal("Report number allocation failed");
    for _ in 0..numbering::MAX_NUMBER_ATTEMPTS {
        let number = numbering::next_report_number(&state.db, today).await?;
        let now = Utc::now();

        let result = entity::reports::ActiveModel {
            id:               Set(Uuid::new_v4()),
            user_id:          Set(auth.user_id),
            member_id:        Set(mission.member_id),
            authorization_id: Set(mission.id),
            report_number:    Set(number.clone()),
            title:            Set(payload.title.clone()),
            content:          Set(payload.content.clone()),
            report_type:      Set(report_type),
            status:           Set(if submit_now { ReportStatus::Submitted } else { ReportStatus::Draft }),
            reviewed_by:      Set(None),
            review_notes:     Set(None),
            submitted_at:     Set(submit_now.then_some(now)),
            reviewed_at:      Set(None),
            created_at:       Set(now),
            updated_at:       Set(now),
        }
        .insert(&state.db)
        .await;

        match result {
            Ok(report) => {
                tracing::info!(user_id = %auth.user_id, number = %report.report_number, "Report created");
                return Ok(ReportResponse::from(report));
            },
            Err(e) => {
                let err = AppError::from(e);
                if err.is_unique_violation() {
                    tracing::debug!(number = %number, "Report number taken, retrying");
                    last_err = err;
                    continue;
                }
                return Err(err.context("Creating report"));
            },
        }
    }

    Err(last_err.context("Allocating report number"))
}

/// `GET /api/v1/reports`
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Query(filter): Query<ReportListQuery>,
    Query(query): Query<ListQuery>,
) -> ServerResult<Json<ApiResponse<Vec<ReportResponse>>>> {
    let mut scope = entity::reports::Entity::find().filter(entity::reports::Column::UserId.eq(auth.user_id));
    if let Some(status) = filter.status.as_deref() {
        scope = scope.filter(entity::reports::Column::Status.eq(parse_status(status)?));
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

    let reports = scope
        .order_by_desc(entity::reports::Column::CreatedAt)
        .offset(offset)
        .limit(pagination.limit())
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Listing reports"))?;

    let data = reports.into_iter().map(ReportResponse::from).collect();
    Ok(Json(ApiResponse::paginated(data, pagination)))
}

/// `GET /api/v1/reports/:id`
pub async fn get_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<ReportResponse>>> {
    let report = find_owned_report(&state, &auth, id).await?;
    Ok(Json(ApiResponse::ok(ReportResponse::from(report))))
}

/// `PUT /api/v1/reports/:id` (draft or rejected only)
pub async fn update_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReportRequest>,
) -> ServerResult<Json<ApiResponse<ReportResponse>>> {
    let report = update_report_inner(&state, &auth, id, payload).await?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn update_report_inner(
    state: &AppState,
    auth: &AuthSession,
    id: Uuid,
    payload: UpdateReportRequest,
) -> ServerResult<ReportResponse> {
    payload.validate()?;
    let report = find_owned_report(state, auth, id).await?;

    if !report.status.is_editable() {
        return Err(AppError::conflict(format!(
            "Report in status '{}' cannot be edited",
            report.status
        )));
    }

    let mut active: entity::reports::ActiveModel = report.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(content) = payload.content {
        active.content = Set(content);
    }
    active.updated_at = Set(Utc::now());

    let report = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Updating report"))?;

    Ok(ReportResponse::from(report))
}

/// `POST /api/v1/reports/:id/submit`
pub async fn submit_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<ReportResponse>>> {
    let report = submit_report_inner(&state, &auth, id).await?;
    Ok(Json(ApiResponse::ok(report)))
}

pub async fn submit_report_inner(state: &AppState, auth: &AuthSession, id: Uuid) -> ServerResult<ReportResponse> {
    let report = find_owned_report(state, auth, id).await?;

    if !report.status.can_submit() {
        return Err(AppError::conflict(format!(
            "Report in status '{}' cannot be submitted",
            report.status
        )));
    }

    let now = Utc::now();
    let mut active: entity::reports::ActiveModel = report.into();
    active.status = Set(ReportStatus::Submitted);
    active.submitted_at = Set(Some(now));
    // A resubmission starts a fresh review.
    active.reviewed_by = Set(None);
    active.review_notes = Set(None);
    active.reviewed_at = Set(None);
    active.updated_at = Set(now);

    let report = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Submitting report"))?;

    tracing::info!(user_id = %auth.user_id, number = %report.report_number, "Report submitted");
    Ok(ReportResponse::from(report))
}

/// `DELETE /api/v1/reports/:id` (cascade)
pub async fn delete_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<()>>> {
    delete_report_inner(&state, &auth, id).await?;
    Ok(Json(ApiResponse::empty()))
}

pub async fn delete_report_inner(state: &AppState, auth: &AuthSession, id: Uuid) -> ServerResult<()> {
    let report = find_owned_report(state, auth, id).await?;

    if !report.status.is_editable() {
        return Err(AppError::conflict(format!(
            "Report in status '{}' cannot be deleted",
            report.status
        )));
    }

    // Rows go in one transaction; the files afterwards are best-effort.
    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Opening delete transaction"))?;

    entity::report_attachments::Entity::delete_many()
        .filter(entity::report_attachments::Column::ReportId.eq(report.id))
        .exec(&txn)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Deleting attachment rows"))?;

    entity::reports::Entity::delete_by_id(report.id)
        .exec(&txn)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Deleting report row"))?;

    txn.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Committing report delete"))?;

    let storage = AttachmentStorage::new(&state.config.upload_dir);
    match storage.remove_report_dir(report.id).await {
        Ok(()) => {
            logging::log_storage_event!("delete_report_dir", storage.report_dir(report.id).display(), true);
        },
        Err(e) => {
            tracing::warn!(report_id = %report.id, error = %e, "Attachment directory cleanup failed");
        },
    }

    Ok(())
}

/// `GET /api/v1/reports/stats`
pub async fn report_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
) -> ServerResult<Json<ApiResponse<ReportStatsResponse>>> {
    let stats = report_stats_inner(&state, &auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn report_stats_inner(state: &AppState, auth: &AuthSession) -> ServerResult<ReportStatsResponse> {
    let scoped = || entity::reports::Entity::find().filter(entity::reports::Column::UserId.eq(auth.user_id));
    let count_status = |status: ReportStatus| {
        scoped()
            .filter(entity::reports::Column::Status.eq(status))
            .count(&state.db)
    };

    let total = scoped()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting reports"))?;
    let draft = count_status(ReportStatus::Draft)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting draft reports"))?;
    let submitted = count_status(ReportStatus::Submitted)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting submitted reports"))?;
    let approved = count_status(ReportStatus::Approved)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting approved reports"))?;
    let rejected = count_status(ReportStatus::Rejected)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Counting rejected reports"))?;

    Ok(ReportStatsResponse {
        total,
        draft,
        submitted,
        approved,
        rejected,
    })
}

/// Loads a report owned by the caller; anything else is a 404.
pub async fn find_owned_report(state: &AppState, auth: &AuthSession, id: Uuid) -> ServerResult<entity::reports::Model> {
    entity::reports::Entity::find_by_id(id)
        .filter(entity::reports::Column::UserId.eq(auth.user_id))
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading report"))?
        .ok_or_else(|| AppError::not_found("Report not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_known_values() {
        assert_eq!(parse_status("draft").unwrap(), ReportStatus::Draft);
        assert_eq!(parse_status("under-review").unwrap(), ReportStatus::UnderReview);
        assert!(parse_status("pending").is_err());
    }

    #[test]
    fn test_parse_type_known_values() {
        assert_eq!(parse_type("mission").unwrap(), ReportType::Mission);
        assert_eq!(parse_type("activity").unwrap(), ReportType::Activity);
        assert!(parse_type("quarterly").is_err());
    }
}
