//! CLI subcommands.

pub mod households;
pub mod migrate;
pub mod sessions;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors that can occur while connecting to the database.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect to the database named by `PANTRY_DATABASE_URL` (or `DATABASE_URL`).
pub async fn connect() -> Result<SqlitePool, ConnectError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PANTRY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| ConnectError::MissingEnvVar("PANTRY_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = pantry_server::db::create_pool(&SecretString::from(database_url)).await?;
    Ok(pool)
}
