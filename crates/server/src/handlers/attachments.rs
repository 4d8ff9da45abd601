//! # Attachment Handlers
//!
//! Multipart upload, listing, and deletion of report attachments. The
//! file is written to disk first and the metadata row inserted second;
//! a failed insert removes the written file so disk and database never
//! disagree in the database's favor.

use axum::{
    extract::{Extension, Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use error::{ApiResponse, AppError};
use http::StatusCode;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::reports::AttachmentResponse,
    handlers::reports::find_owned_report,
    middleware::AuthSession,
    storage::{self, AttachmentStorage},
    AppState,
    ServerResult,
};

/// An upload parsed out of the multipart body.
pub struct UploadParts {
    pub filename:    String,
    pub data:        Vec<u8>,
    pub description: Option<String>,
}

/// Reads the `file` and optional `description` fields from a multipart
/// body.
async fn read_multipart(mut multipart: Multipart) -> ServerResult<UploadParts> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(ToString::to_string)
                    .ok_or_else(|| AppError::bad_request("File field has no filename"))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(format!("Reading file field: {e}")))?;
                file = Some((filename, data.to_vec()));
            },
            Some("description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(format!("Reading description field: {e}")))?;
                if !text.is_empty() {
                    description = Some(text);
                }
            },
            _ => {},
        }
    }

    let (filename, data) = file.ok_or_else(|| AppError::bad_request("Missing 'file' field"))?;
    Ok(UploadParts {
        filename,
        data,
        description,
    })
}

/// `POST /api/v1/reports/:id/attachments`
pub async fn upload_attachment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(report_id): Path<Uuid>,
    multipart: Multipart,
) -> ServerResult<impl IntoResponse> {
    let parts = read_multipart(multipart).await?;
    let attachment = upload_attachment_inner(&state, &auth, report_id, parts).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(attachment))))
}

pub async fn upload_attachment_inner(
    state: &AppState,
    auth: &AuthSession,
    report_id: Uuid,
    parts: UploadParts,
) -> ServerResult<AttachmentResponse> {
    let report = find_owned_report(state, auth, report_id).await?;

    if !report.status.is_editable() {
        return Err(AppError::conflict(format!(
            "Attachments cannot be added to a report in status '{}'",
            report.status
        )));
    }

    // Validation failures persist nothing.
    let prepared = storage::prepare_upload(&parts.filename, &parts.data)?;

    let attachment_storage = AttachmentStorage::new(&state.config.upload_dir);
    let path = attachment_storage
        .save(report.id, &prepared.stored_filename, &parts.data)
        .await?;
    logging::log_storage_event!("save_attachment", path.display(), true);

    let result = entity::report_attachments::ActiveModel {
        id:                Set(Uuid::new_v4()),
        report_id:         Set(report.id),
        original_filename: Set(parts.filename),
        stored_filename:   Set(prepared.stored_filename.clone()),
        file_path:         Set(path.to_string_lossy().into_owned()),
        file_size:         Set(prepared.file_size),
        file_type:         Set(prepared.extension),
        mime_type:         Set(prepared.mime_type),
        attachment_type:   Set(prepared.attachment_type),
        description:       Set(parts.description),
        file_hash:         Set(prepared.file_hash),
        uploaded_by:       Set(auth.user_id),
        uploaded_at:       Set(Utc::now()),
    }
    .insert(&state.db)
    .await;

    match result {
        Ok(attachment) => Ok(AttachmentResponse::from(attachment)),
        Err(e) => {
            // Compensating delete keeps disk and database consistent.
            if let Err(cleanup) = attachment_storage.remove_file(report.id, &prepared.stored_filename).await {
                tracing::warn!(error = %cleanup, "Orphaned attachment file left on disk");
            }
            Err(AppError::database(e.to_string()).context("Recording attachment"))
        },
    }
}

/// `GET /api/v1/reports/:id/attachments`
pub async fn list_attachments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(report_id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<Vec<AttachmentResponse>>>> {
    let report = find_owned_report(&state, &auth, report_id).await?;

    let attachments = entity::report_attachments::Entity::find()
        .filter(entity::report_attachments::Column::ReportId.eq(report.id))
        .order_by_asc(entity::report_attachments::Column::UploadedAt)
        .all(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Listing attachments"))?;

    let data = attachments.into_iter().map(AttachmentResponse::from).collect();
    Ok(Json(ApiResponse::ok(data)))
}

/// `DELETE /api/v1/attachments/:id`
pub async fn delete_attachment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> ServerResult<Json<ApiResponse<()>>> {
    delete_attachment_inner(&state, &auth, id).await?;
    Ok(Json(ApiResponse::empty()))
}

pub async fn delete_attachment_inner(state: &AppState, auth: &AuthSession, id: Uuid) -> ServerResult<()> {
    let attachment = entity::report_attachments::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Loading attachment"))?
        .ok_or_else(|| AppError::not_found("Attachment not found"))?;

    // Ownership flows through the report; a non-owned attachment is a 404.
    let report = find_owned_report(state, auth, attachment.report_id).await?;

    if !report.status.is_editable() {
        return Err(AppError::conflict(format!(
            "Attachments cannot be removed from a report in status '{}'",
            report.status
        )));
    }

    entity::report_attachments::Entity::delete_by_id(attachment.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(e.to_string()).context("Deleting attachment row"))?;

    let attachment_storage = AttachmentStorage::new(&state.config.upload_dir);
    match attachment_storage.remove_file(report.id, &attachment.stored_filename).await {
        Ok(()) => {
            logging::log_storage_event!("delete_attachment", attachment.stored_filename, true);
        },
        Err(e) => {
            tracing::warn!(attachment_id = %attachment.id, error = %e, "Attachment file cleanup failed");
        },
    }

    Ok(())
}
