//! # Waypoint Schema Migrations
//!
//! Sea-ORM migrations for the Waypoint database schema. Migrations avoid
//! engine-specific column types so the same set runs on Postgres in
//! production and SQLite in integration tests.

pub use sea_orm_migration::prelude::*;

pub mod db;

mod m20260301_000001_create_users_table;
mod m20260301_000002_create_members_table;
mod m20260301_000003_create_mission_authorizations_table;
mod m20260301_000004_create_reports_table;
mod m20260301_000005_create_report_attachments_table;
mod m20260301_000006_create_sessions_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users_table::Migration),
            Box::new(m20260301_000002_create_members_table::Migration),
            Box::new(m20260301_000003_create_mission_authorizations_table::Migration),
            Box::new(m20260301_000004_create_reports_table::Migration),
            Box::new(m20260301_000005_create_report_attachments_table::Migration),
            Box::new(m20260301_000006_create_sessions_table::Migration),
        ]
    }
}

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}
