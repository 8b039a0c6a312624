//! Database operations for the Pantry `SQLite` database.
//!
//! ## Tables
//!
//! - `household` - Tenants, identified by their normalized address
//! - `member` - People in a household (unique name per household)
//! - `store` - Shopping locations of a household (unique name per household)
//! - `item` - Tracked inventory of a store, with stock thresholds
//! - `tower_sessions` - Session storage (owned by the session store)
//!
//! Uniqueness and stock-ordering rules are enforced by the schema itself, as a
//! second line of defense behind form validation. Constraint violations are
//! surfaced as [`RepositoryError::Conflict`] or [`RepositoryError::Constraint`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p pantry-cli -- migrate
//! ```

pub mod households;
pub mod items;
pub mod members;
pub mod stores;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use thiserror::Error;
use tower_sessions_sqlx_store::SqliteStore;

pub use households::HouseholdRepository;
pub use items::ItemRepository;
pub use members::MemberRepository;
pub use stores::StoreRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness violation (e.g., a second household at the same address).
    #[error("already exists: {0}")]
    Conflict(String),

    /// Check constraint violation (e.g., minimum stock above ideal stock).
    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Errors that can occur while migrating the database.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("schema migration failed: {0}")]
    Schema(#[from] MigrateError),

    #[error("session store migration failed: {0}")]
    Sessions(#[from] sqlx::Error),
}

/// Classify a failed write.
///
/// Unique violations become [`RepositoryError::Conflict`] carrying `conflict`,
/// check violations become [`RepositoryError::Constraint`].
pub(crate) fn map_write_error(err: sqlx::Error, conflict: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(conflict.to_owned());
    }
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_check_violation()
    {
        return RepositoryError::Constraint(db_err.message().to_owned());
    }
    RepositoryError::Database(err)
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing. Foreign keys are enforced on every
/// connection so that deleting a household cascades to its members and stores.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a pool over a private in-memory database.
///
/// Uses a single long-lived connection: an in-memory database disappears with
/// the last connection that references it.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Apply schema migrations and create the session table.
///
/// # Errors
///
/// Returns `MigrationError` if either migration step fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrationError> {
    MIGRATOR.run(pool).await?;
    SqliteStore::new(pool.clone()).migrate().await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    /// Fresh migrated in-memory database.
    pub async fn pool() -> SqlitePool {
        let pool = super::create_memory_pool().await.unwrap();
        super::run_migrations(&pool).await.unwrap();
        pool
    }
}
