//! # CLI Migration Command
//!
//! Database migration handling for the Waypoint CLI.

use error::Result;
use migration::{Migrator, MigratorTrait as _};
use tracing::info;

use crate::commands::MigrateArgs;

/// Runs database migrations against the database named by the
/// `WAYPOINT_DATABASE_*` environment variables.
pub async fn migrate(args: MigrateArgs) -> Result<()> {
    info!(
        target: "migrate",
        dry_run = %args.dry_run,
        rollback = %args.rollback,
        "Running database migrations..."
    );

    let db = migration::db::connect_from_env().await?;

    if args.dry_run {
        let pending = Migrator::get_pending_migrations(&db).await?;
        info!(
            target: "migrate",
            pending_count = %pending.len(),
            "Pending migrations found"
        );
        for m in &pending {
            info!(target: "migrate", migration = %m.name(), "Would apply");
        }
        return Ok(());
    }

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");
        Migrator::down(&db, None).await?;
        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    Migrator::up(&db, None).await?;
    info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}
