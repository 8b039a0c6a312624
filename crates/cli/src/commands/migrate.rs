//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded in the
//! server crate. The session table is created alongside them.

use sqlx::SqlitePool;

use pantry_server::db::{self, MigrationError};

/// Apply all pending migrations.
pub async fn run(pool: &SqlitePool) -> Result<(), MigrationError> {
    tracing::info!("Running migrations...");
    db::run_migrations(pool).await?;
    tracing::info!("Migrations complete!");
    Ok(())
}
