//! # Common Test Utilities
//!
//! Shared infrastructure for integration tests: an in-memory SQLite
//! database with the full schema applied, plus fixtures for accounts,
//! members, missions, and reports.

use std::sync::Once;

use chrono::{NaiveDate, Utc};
use entity::{
    mission_authorizations::MissionStatus,
    reports::ReportStatus,
    users::{UserRole, UserStatus},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database};
use secrecy::{ExposeSecret, SecretString};
use server::{middleware::AuthSession, AppState, ServerConfig};
use tempfile::TempDir;
use uuid::Uuid;

/// Password used by every fixture account.
pub const TEST_PASSWORD: &str = "Waypoint1Pass";

static INIT: Once = Once::new();

/// Initialize test logging (run once per test session)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Application state over a fresh in-memory database, holding the
/// temporary upload directory alive for the test's duration.
pub struct TestApp {
    pub state:       AppState,
    pub _upload_dir: TempDir,
}

/// Creates a fresh in-memory database with migrations applied and an
/// [`AppState`] around it.
pub async fn setup() -> TestApp {
    init_test_env();

    // A single connection keeps every query on the same in-memory
    // database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");

    let upload_dir = tempfile::tempdir().expect("create upload dir");
    let config = ServerConfig::new().with_upload_dir(upload_dir.path());

    TestApp {
        state:       AppState::new(db, config),
        _upload_dir: upload_dir,
    }
}

/// Inserts an account with the given role and status. The password is
/// [`TEST_PASSWORD`].
pub async fn create_user(state: &AppState, email: &str, role: UserRole, status: UserStatus) -> entity::users::Model {
    let password = SecretString::from(TEST_PASSWORD.to_string());
    let hash = auth::hash_password(&password, None).expect("hash password");
    let now = Utc::now();

    entity::users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        email:         Set(email.to_string()),
        password_hash: Set(hash.expose_secret().to_string()),
        first_name:    Set("Test".to_string()),
        last_name:     Set("User".to_string()),
        phone:         Set(None),
        role:          Set(role),
        status:        Set(status),
        last_login_at: Set(None),
        created_at:    Set(now),
        updated_at:    Set(now),
    }
    .insert(&state.db)
    .await
    .expect("insert user")
}

/// Inserts an active member owned by the given account.
pub async fn create_member(state: &AppState, user_id: Uuid, employee_id: &str) -> entity::members::Model {
    let now = Utc::now();
    entity::members::ActiveModel {
        id:          Set(Uuid::new_v4()),
        user_id:     Set(user_id),
        first_name:  Set("Maya".to_string()),
        last_name:   Set("Cruz".to_string()),
        middle_name: Set(None),
        email:       Set(None),
        phone:       Set(None),
        position:    Set(Some("Field Officer".to_string())),
        department:  Set(Some("Operations".to_string())),
        employee_id: Set(employee_id.to_string()),
        status:      Set(entity::members::MemberStatus::Active),
        created_at:  Set(now),
        updated_at:  Set(now),
    }
    .insert(&state.db)
    .await
    .expect("insert member")
}

/// Inserts a mission in the given status with the given number.
pub async fn create_mission(
    state: &AppState,
    user_id: Uuid,
    member_id: Uuid,
    number: &str,
    status: MissionStatus,
) -> entity::mission_authorizations::Model {
    let now = Utc::now();
    entity::mission_authorizations::ActiveModel {
        id:                     Set(Uuid::new_v4()),
        user_id:                Set(user_id),
        member_id:              Set(member_id),
        authorization_number:   Set(number.to_string()),
        purpose:                Set("Coordination meeting".to_string()),
        destination:            Set("Davao City".to_string()),
        departure_date:         Set(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()),
        return_date:            Set(NaiveDate::from_ymd_opt(2026, 3, 12).unwrap()),
        duration_days:          Set(3),
        status:                 Set(status),
        authorized_by:          Set(None),
        authorized_by_position: Set(None),
        authorization_date:     Set(None),
        created_at:             Set(now),
        updated_at:             Set(now),
    }
    .insert(&state.db)
    .await
    .expect("insert mission")
}

/// Inserts a report in the given status with the given number.
pub async fn create_report(
    state: &AppState,
    user_id: Uuid,
    member_id: Uuid,
    authorization_id: Uuid,
    number: &str,
    status: ReportStatus,
) -> entity::reports::Model {
    let now = Utc::now();
    entity::reports::ActiveModel {
        id:               Set(Uuid::new_v4()),
        user_id:          Set(user_id),
        member_id:        Set(member_id),
        authorization_id: Set(authorization_id),
        report_number:    Set(number.to_string()),
        title:            Set("Mission outcome".to_string()),
        content:          Set("Summary of activities.".to_string()),
        report_type:      Set(entity::reports::ReportType::Mission),
        status:           Set(status),
        reviewed_by:      Set(None),
        review_notes:     Set(None),
        submitted_at:     Set(None),
        reviewed_at:      Set(None),
        created_at:       Set(now),
        updated_at:       Set(now),
    }
    .insert(&state.db)
    .await
    .expect("insert report")
}

/// Builds an [`AuthSession`] for a user without going through the login
/// flow, for calling handler inner functions directly.
pub fn auth_session_for(user: &entity::users::Model) -> AuthSession {
    AuthSession {
        user_id:      user.id,
        email:        user.email.clone(),
        display_name: user.display_name(),
        role:         user.role,
        session_id:   Uuid::new_v4(),
        csrf_token:   None,
    }
}
