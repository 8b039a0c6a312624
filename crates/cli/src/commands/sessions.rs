//! Session store maintenance.

use sqlx::SqlitePool;
use tower_sessions::session_store::{self, ExpiredDeletion};
use tower_sessions_sqlx_store::SqliteStore;

/// Delete sessions whose expiry has passed.
pub async fn prune(pool: &SqlitePool) -> Result<(), session_store::Error> {
    tracing::info!("Deleting expired sessions...");
    SqliteStore::new(pool.clone()).delete_expired().await?;
    tracing::info!("Expired sessions deleted");
    Ok(())
}
