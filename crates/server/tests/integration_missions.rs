//! Integration tests for the mission authorization workflow.

mod common;

use chrono::{Datelike, NaiveDate, Utc};
use entity::{mission_authorizations::MissionStatus, users::{UserRole, UserStatus}};
use error::AppError;
use sea_orm::{ActiveModelTrait, EntityTrait};
use server::{
    dto::{
        admin::ApproveMissionRequest,
        missions::{CreateMissionRequest, UpdateMissionRequest},
    },
    handlers::{admin, missions},
};

use crate::common::{auth_session_for, create_member, create_mission, create_user, setup};

fn mission_payload(member_id: uuid::Uuid) -> CreateMissionRequest {
    CreateMissionRequest {
        member_id,
        purpose: "Coordination meeting".to_string(),
        destination: "Davao City".to_string(),
        departure_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        return_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
    }
}

#[tokio::test]
async fn test_create_assigns_sequential_numbers() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let auth = auth_session_for(&user);

    let year = Utc::now().year();
    let first = missions::create_mission_inner(&app.state, &auth, mission_payload(member.id))
        .await
        .unwrap();
    let second = missions::create_mission_inner(&app.state, &auth, mission_payload(member.id))
        .await
        .unwrap();

    assert_eq!(first.authorization_number, format!("MA-{year}-0001"));
    assert_eq!(second.authorization_number, format!("MA-{year}-0002"));
    assert_eq!(first.duration_days, 3);
    assert_eq!(first.status, "draft");
}

#[tokio::test]
async fn test_numbering_skips_gap_after_delete() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let auth = auth_session_for(&user);

    let first = missions::create_mission_inner(&app.state, &auth, mission_payload(member.id))
        .await
        .unwrap();
    let second = missions::create_mission_inner(&app.state, &auth, mission_payload(member.id))
        .await
        .unwrap();

    // Deleting the latest draft must not cause its number to be reissued.
    missions::delete_mission_inner(&app.state, &auth, second.id).await.unwrap();
    let third = missions::create_mission_inner(&app.state, &auth, mission_payload(member.id))
        .await
        .unwrap();

    assert_ne!(third.authorization_number, first.authorization_number);
    assert_eq!(third.authorization_number, second.authorization_number);
}

#[tokio::test]
async fn test_concurrent_creates_yield_distinct_numbers() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let auth = auth_session_for(&user);

    let tasks: Vec<_> = (0..5)
        .map(|_| {
            let state = app.state.clone();
            let auth = auth.clone();
            let payload = mission_payload(member.id);
            tokio::spawn(async move { missions::create_mission_inner(&state, &auth, payload).await })
        })
        .collect();

    let mut numbers = Vec::new();
    for task in tasks {
        numbers.push(task.await.unwrap().unwrap().authorization_number);
    }
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 5, "every mission got a distinct number");
}

#[tokio::test]
async fn test_member_of_other_account_reads_as_missing() {
    let app = setup().await;
    let owner = create_user(&app.state, "owner@example.com", UserRole::Member, UserStatus::Active).await;
    let other = create_user(&app.state, "other@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, owner.id, "EMP-001").await;

    let err = missions::create_mission_inner(&app.state, &auth_session_for(&other), mission_payload(member.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_inverted_dates_rejected() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;

    let mut payload = mission_payload(member.id);
    payload.return_date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
    let err = missions::create_mission_inner(&app.state, &auth_session_for(&user), payload)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_update_outside_draft_leaves_row_unchanged() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let mission = create_mission(&app.state, user.id, member.id, "MA-2026-0001", MissionStatus::Approved).await;
    let auth = auth_session_for(&user);

    let err = missions::update_mission_inner(
        &app.state,
        &auth,
        mission.id,
        UpdateMissionRequest {
            member_id:      None,
            purpose:        Some("Rewritten purpose".to_string()),
            destination:    Some("Elsewhere".to_string()),
            departure_date: None,
            return_date:    None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    // Field-by-field: the rejected transition wrote nothing.
    let after = entity::mission_authorizations::Entity::find_by_id(mission.id)
        .one(&app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after, mission);
}

#[tokio::test]
async fn test_delete_outside_draft_rejected() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let mission = create_mission(&app.state, user.id, member.id, "MA-2026-0001", MissionStatus::Pending).await;

    let err = missions::delete_mission_inner(&app.state, &auth_session_for(&user), mission.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    let still_there = entity::mission_authorizations::Entity::find_by_id(mission.id)
        .one(&app.state.db)
        .await
        .unwrap();
    assert!(still_there.is_some());
}

#[tokio::test]
async fn test_admin_approval_stamps_authorizer() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let admin_user = create_user(&app.state, "admin@example.com", UserRole::Admin, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let mission = create_mission(&app.state, user.id, member.id, "MA-2026-0001", MissionStatus::Pending).await;

    let approved = admin::approve_mission_inner(
        &app.state,
        &auth_session_for(&admin_user),
        mission.id,
        ApproveMissionRequest {
            authorized_by:          "Col. R. Dizon".to_string(),
            authorized_by_position: "Regional Director".to_string(),
            authorization_date:     None,
        },
    )
    .await
    .unwrap();

    assert_eq!(approved.status, "approved");
    assert_eq!(approved.authorized_by.as_deref(), Some("Col. R. Dizon"));
    assert!(approved.authorization_date.is_some());
}

#[tokio::test]
async fn test_approval_is_not_replayable() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let admin_user = create_user(&app.state, "admin@example.com", UserRole::Admin, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let mission = create_mission(&app.state, user.id, member.id, "MA-2026-0001", MissionStatus::Approved).await;

    let err = admin::approve_mission_inner(
        &app.state,
        &auth_session_for(&admin_user),
        mission.id,
        ApproveMissionRequest {
            authorized_by:          "Someone Else".to_string(),
            authorized_by_position: "Impostor".to_string(),
            authorization_date:     None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_document_requires_approved_status() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let draft = create_mission(&app.state, user.id, member.id, "MA-2026-0001", MissionStatus::Draft).await;
    let approved = create_mission(&app.state, user.id, member.id, "MA-2026-0002", MissionStatus::Approved).await;
    let auth = auth_session_for(&user);

    let err = missions::mission_document_inner(&app.state, &auth, draft.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    let document = missions::mission_document_inner(&app.state, &auth, approved.id).await.unwrap();
    assert_eq!(document.authorization_number, "MA-2026-0002");
    assert_eq!(document.member_name, "Maya Cruz");
}

#[tokio::test]
async fn test_stats_count_by_status() {
    let app = setup().await;
    let user = create_user(&app.state, "agent@example.com", UserRole::Member, UserStatus::Active).await;
    let member = create_member(&app.state, user.id, "EMP-001").await;
    let draft =
        create_mission(&app.state, user.id, member.id, "MA-2026-0001", MissionStatus::Draft).await;
    create_mission(&app.state, user.id, member.id, "MA-2026-0002", MissionStatus::Pending).await;
    create_mission(&app.state, user.id, member.id, "MA-2026-0003", MissionStatus::Approved).await;

    // A draft departing tomorrow still counts as upcoming; the fixture
    // missions all departed in the past.
    let tomorrow = Utc::now().date_naive() + chrono::Duration::days(1);
    let mut upcoming_draft = entity::mission_authorizations::ActiveModel::from(draft);
    upcoming_draft.departure_date = sea_orm::Set(tomorrow);
    upcoming_draft.return_date = sea_orm::Set(tomorrow + chrono::Duration::days(2));
    upcoming_draft.update(&app.state.db).await.unwrap();

    let stats = missions::mission_stats_inner(&app.state, &auth_session_for(&user)).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.draft, 1);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.approved, 1);
    assert_eq!(stats.upcoming, 1);
}
