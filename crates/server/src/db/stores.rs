//! Store repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use pantry_core::{Address, HouseholdId, Name, StoreId};

use super::{RepositoryError, map_write_error};
use crate::models::{NewStore, Store};

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: StoreId,
    household_id: HouseholdId,
    name: Name,
    street_address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let address = match (row.street_address, row.city, row.state, row.zip_code) {
            (Some(street), Some(city), Some(state), Some(zip)) => {
                Some(Address::from_stored(street, city, state, zip))
            }
            (None, None, None, None) => None,
            _ => {
                return Err(RepositoryError::DataCorruption(format!(
                    "store {} has a partial address",
                    row.id
                )));
            }
        };

        Ok(Self {
            id: row.id,
            household_id: row.household_id,
            name: row.name,
            address,
            created_at: row.created_at,
        })
    }
}

/// Repository for store database operations.
///
/// Reads are always scoped by the owning household.
pub struct StoreRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a store for `household_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the household already has a store
    /// with this name.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        household_id: HouseholdId,
        store: &NewStore,
    ) -> Result<Store, RepositoryError> {
        let created_at = Utc::now();
        let address = store.address.as_ref();

        let result = sqlx::query(
            r"
            INSERT INTO store (household_id, name, street_address, city, state, zip_code, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(household_id)
        .bind(&store.name)
        .bind(address.map(Address::street_address))
        .bind(address.map(Address::city))
        .bind(address.map(Address::state))
        .bind(address.map(Address::zip_code))
        .bind(created_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_write_error(e, "store name already exists"))?;

        Ok(Store {
            id: StoreId::new(result.last_insert_rowid()),
            household_id,
            name: store.name.clone(),
            address: store.address.clone(),
            created_at,
        })
    }

    /// List a household's stores by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored address is partial.
    pub async fn list_for_household(
        &self,
        household_id: HouseholdId,
    ) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, household_id, name, street_address, city, state, zip_code, created_at
            FROM store
            WHERE household_id = ?
            ORDER BY name, id
            ",
        )
        .bind(household_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Store::try_from).collect()
    }

    /// Get a store of `household_id` by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored address is partial.
    pub async fn get_in_household(
        &self,
        household_id: HouseholdId,
        id: StoreId,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, household_id, name, street_address, city, state, zip_code, created_at
            FROM store
            WHERE id = ? AND household_id = ?
            ",
        )
        .bind(id)
        .bind(household_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Store::try_from).transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{HouseholdRepository, test_support};

    async fn household(pool: &SqlitePool, street: &str) -> HouseholdId {
        let address = Address::parse(street, "Springfield", "IL", "62704").unwrap();
        HouseholdRepository::new(pool)
            .create(&address, "hash")
            .await
            .unwrap()
            .id
    }

    fn new_store(name: &str, address: Option<Address>) -> NewStore {
        NewStore {
            name: Name::parse(name).unwrap(),
            address,
        }
    }

    #[tokio::test]
    async fn test_create_with_and_without_address() {
        let pool = test_support::pool().await;
        let id = household(&pool, "1 First Street").await;
        let repo = StoreRepository::new(&pool);

        let address = Address::parse("5 Market Road", "Springfield", "IL", "62701").unwrap();
        repo.create(id, &new_store("Corner Market", Some(address.clone())))
            .await
            .unwrap();
        repo.create(id, &new_store("Bakery", None)).await.unwrap();

        let stores = repo.list_for_household(id).await.unwrap();
        assert_eq!(stores.len(), 2);
        assert_eq!(stores[0].name.as_str(), "bakery");
        assert!(stores[0].address.is_none());
        assert_eq!(stores[1].address, Some(address));
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts_within_household_only() {
        let pool = test_support::pool().await;
        let first = household(&pool, "1 First Street").await;
        let second = household(&pool, "2 Second Street").await;
        let repo = StoreRepository::new(&pool);

        repo.create(first, &new_store("Market", None)).await.unwrap();
        repo.create(second, &new_store("Market", None)).await.unwrap();

        let err = repo
            .create(first, &new_store(" MARKET", None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_is_scoped_to_household() {
        let pool = test_support::pool().await;
        let first = household(&pool, "1 First Street").await;
        let second = household(&pool, "2 Second Street").await;
        let repo = StoreRepository::new(&pool);

        let store = repo.create(first, &new_store("Market", None)).await.unwrap();

        assert!(repo.get_in_household(first, store.id).await.unwrap().is_some());
        assert!(repo.get_in_household(second, store.id).await.unwrap().is_none());
    }
}
