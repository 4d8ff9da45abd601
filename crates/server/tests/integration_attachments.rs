//! Integration tests for attachment upload, deletion, and the cascade
//! delete of a report with files on disk.

mod common;

use entity::{
    mission_authorizations::MissionStatus,
    reports::ReportStatus,
    users::{UserRole, UserStatus},
};
use error::AppError;
use sea_orm::EntityTrait;
use server::{
    handlers::{attachments, reports},
    handlers::attachments::UploadParts,
    storage::{AttachmentStorage, MAX_ATTACHMENT_BYTES},
};

use crate::common::{auth_session_for, create_member, create_mission, create_report, create_user, setup, TestApp};

async fn fixture(app: &TestApp) -> (entity::users::Model, entity::reports::Model) {
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let mission = create_mission(&app.state, user.id, member.id, "MA-2026-0001", MissionStatus::Approved).await;
    let report = create_report(
        &app.state,
        user.id,
        member.id,
        mission.id,
        "RPT-202603-0001",
        ReportStatus::Draft,
    )
    .await;
    (user, report)
}

fn upload(filename: &str, data: &[u8]) -> UploadParts {
    UploadParts {
        filename:    filename.to_string(),
        data:        data.to_vec(),
        description: None,
    }
}

#[tokio::test]
async fn test_upload_writes_file_and_row() {
    let app = setup().await;
    let (user, report) = fixture(&app).await;
    let auth = auth_session_for(&user);

    let attachment = attachments::upload_attachment_inner(&app.state, &auth, report.id, upload("notes.txt", b"notes"))
        .await
        .unwrap();
    assert_eq!(attachment.file_type, "txt");
    assert_eq!(attachment.attachment_type, "document");
    assert_eq!(attachment.file_size, 5);

    let rows = entity::report_attachments::Entity::find().all(&app.state.db).await.unwrap();
    assert_eq!(rows.len(), 1);

    let storage = AttachmentStorage::new(&app.state.config.upload_dir);
    let path = storage.file_path(report.id, &rows[0].stored_filename);
    assert!(path.exists());
}

#[tokio::test]
async fn test_rejected_extension_persists_nothing() {
    let app = setup().await;
    let (user, report) = fixture(&app).await;

    let err = attachments::upload_attachment_inner(
        &app.state,
        &auth_session_for(&user),
        report.id,
        upload("payload.exe", b"MZ"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let rows = entity::report_attachments::Entity::find().all(&app.state.db).await.unwrap();
    assert!(rows.is_empty());

    let storage = AttachmentStorage::new(&app.state.config.upload_dir);
    assert!(!storage.report_dir(report.id).exists());
}

#[tokio::test]
async fn test_oversize_upload_persists_nothing() {
    let app = setup().await;
    let (user, report) = fixture(&app).await;

    let data = vec![0u8; MAX_ATTACHMENT_BYTES + 1];
    let err = attachments::upload_attachment_inner(
        &app.state,
        &auth_session_for(&user),
        report.id,
        upload("big.pdf", &data),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let rows = entity::report_attachments::Entity::find().all(&app.state.db).await.unwrap();
    assert!(rows.is_empty());
    let storage = AttachmentStorage::new(&app.state.config.upload_dir);
    assert!(!storage.report_dir(report.id).exists());
}

#[tokio::test]
async fn test_upload_rejected_once_report_is_submitted() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let mission = create_mission(&app.state, user.id, member.id, "MA-2026-0001", MissionStatus::Approved).await;
    let report = create_report(
        &app.state,
        user.id,
        member.id,
        mission.id,
        "RPT-202603-0001",
        ReportStatus::Submitted,
    )
    .await;

    let err = attachments::upload_attachment_inner(
        &app.state,
        &auth_session_for(&user),
        report.id,
        upload("late.pdf", b"%PDF"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_delete_attachment_removes_row_and_file() {
    let app = setup().await;
    let (user, report) = fixture(&app).await;
    let auth = auth_session_for(&user);

    let attachment = attachments::upload_attachment_inner(&app.state, &auth, report.id, upload("photo.jpg", b"JFIF"))
        .await
        .unwrap();

    attachments::delete_attachment_inner(&app.state, &auth, attachment.id).await.unwrap();

    let rows = entity::report_attachments::Entity::find().all(&app.state.db).await.unwrap();
    assert!(rows.is_empty());

    let storage = AttachmentStorage::new(&app.state.config.upload_dir);
    let leftover: Vec<_> = match std::fs::read_dir(storage.report_dir(report.id)) {
        Ok(entries) => entries.collect(),
        Err(_) => Vec::new(),
    };
    assert!(leftover.is_empty());
}

#[tokio::test]
async fn test_report_cascade_delete_removes_rows_and_files() {
    let app = setup().await;
    let (user, report) = fixture(&app).await;
    let auth = auth_session_for(&user);

    for name in ["a.txt", "b.pdf", "c.png"] {
        attachments::upload_attachment_inner(&app.state, &auth, report.id, upload(name, b"data"))
            .await
            .unwrap();
    }

    reports::delete_report_inner(&app.state, &auth, report.id).await.unwrap();

    let report_rows = entity::reports::Entity::find().all(&app.state.db).await.unwrap();
    assert!(report_rows.is_empty());
    let attachment_rows = entity::report_attachments::Entity::find().all(&app.state.db).await.unwrap();
    assert!(attachment_rows.is_empty());

    let storage = AttachmentStorage::new(&app.state.config.upload_dir);
    assert!(!storage.report_dir(report.id).exists());
}
