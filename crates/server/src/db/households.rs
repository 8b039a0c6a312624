//! Household repository for database operations.
//!
//! Addresses arrive here already normalized by [`Address::parse`], so lookups
//! are plain equality matches against the `unique_household_address` key.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use pantry_core::{Address, HouseholdId};

use super::{RepositoryError, map_write_error};
use crate::models::household::{Household, HouseholdSummary};

#[derive(sqlx::FromRow)]
struct HouseholdRow {
    id: HouseholdId,
    street_address: String,
    city: String,
    state: String,
    zip_code: String,
    created_at: DateTime<Utc>,
}

impl From<HouseholdRow> for Household {
    fn from(row: HouseholdRow) -> Self {
        Self {
            id: row.id,
            address: Address::from_stored(row.street_address, row.city, row.state, row.zip_code),
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    household: HouseholdRow,
    passcode_hash: String,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    #[sqlx(flatten)]
    household: HouseholdRow,
    member_count: i64,
}

/// Repository for household database operations.
pub struct HouseholdRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> HouseholdRepository<'a> {
    /// Create a new household repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a household with an already-hashed passcode.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a household already exists at this
    /// address.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        address: &Address,
        passcode_hash: &str,
    ) -> Result<Household, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO household (street_address, city, state, zip_code, passcode_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(address.street_address())
        .bind(address.city())
        .bind(address.state())
        .bind(address.zip_code())
        .bind(passcode_hash)
        .bind(created_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_write_error(e, "household address already exists"))?;

        Ok(Household {
            id: HouseholdId::new(result.last_insert_rowid()),
            address: address.clone(),
            created_at,
        })
    }

    /// Get a household by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: HouseholdId) -> Result<Option<Household>, RepositoryError> {
        let row = sqlx::query_as::<_, HouseholdRow>(
            r"
            SELECT id, street_address, city, state, zip_code, created_at
            FROM household
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Household::from))
    }

    /// Get a household and its passcode hash by address.
    ///
    /// Returns `None` when no household exists at this address. The unique
    /// address constraint guarantees at most one match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials(
        &self,
        address: &Address,
    ) -> Result<Option<(Household, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r"
            SELECT id, street_address, city, state, zip_code, created_at, passcode_hash
            FROM household
            WHERE street_address = ? AND city = ? AND state = ? AND zip_code = ?
            ",
        )
        .bind(address.street_address())
        .bind(address.city())
        .bind(address.state())
        .bind(address.zip_code())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (Household::from(r.household), r.passcode_hash)))
    }

    /// List every household with its member count, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_member_counts(&self) -> Result<Vec<HouseholdSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r"
            SELECT h.id, h.street_address, h.city, h.state, h.zip_code, h.created_at,
                   COUNT(m.id) AS member_count
            FROM household h
            LEFT JOIN member m ON m.household_id = h.id
            GROUP BY h.id
            ORDER BY h.id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| HouseholdSummary {
                household: Household::from(r.household),
                member_count: r.member_count,
            })
            .collect())
    }
}
