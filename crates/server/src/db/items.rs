//! Item repository for database operations.
//!
//! Callers resolve the store within the session's household first; item
//! queries are then scoped by that store.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use pantry_core::{ItemId, Name, Price, StockLevels, StoreId};

use super::{RepositoryError, map_write_error};
use crate::models::{Item, NewItem};

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: ItemId,
    store_id: StoreId,
    name: Name,
    description: String,
    price_cents: i64,
    unit: String,
    current_stock: i64,
    ideal_stock: i64,
    minimum_stock: i64,
    average_usage: f64,
    created_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            name: row.name,
            description: row.description,
            price: Price::from_cents(row.price_cents),
            unit: row.unit,
            stock: StockLevels::from_stored(row.current_stock, row.ideal_stock, row.minimum_stock),
            average_usage: row.average_usage,
            created_at: row.created_at,
        }
    }
}

const SELECT_ITEM: &str = r"
    SELECT id, store_id, name, description, price_cents, unit,
           current_stock, ideal_stock, minimum_stock, average_usage, created_at
    FROM item
";

/// Repository for item database operations.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an item into a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Constraint` if a check constraint rejects the
    /// row (e.g. `item_minimum_within_ideal`).
    /// Returns `RepositoryError::DataCorruption` if the price does not fit in
    /// cents.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, store_id: StoreId, item: &NewItem) -> Result<Item, RepositoryError> {
        let created_at = Utc::now();
        let price_cents = item.price.to_cents().ok_or_else(|| {
            RepositoryError::DataCorruption(format!("price out of range: {}", item.price))
        })?;

        let result = sqlx::query(
            r"
            INSERT INTO item (
                store_id, name, description, price_cents, unit,
                current_stock, ideal_stock, minimum_stock, average_usage, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(store_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(price_cents)
        .bind(&item.unit)
        .bind(item.stock.current())
        .bind(item.stock.ideal())
        .bind(item.stock.minimum())
        .bind(item.average_usage)
        .bind(created_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_write_error(e, "item rejected"))?;

        Ok(Item {
            id: ItemId::new(result.last_insert_rowid()),
            store_id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            unit: item.unit.clone(),
            stock: item.stock,
            average_usage: item.average_usage,
            created_at,
        })
    }

    /// List a store's items ordered by name, then id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(&self, store_id: StoreId) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "{SELECT_ITEM} WHERE store_id = ? ORDER BY name, id"
        ))
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    /// Get an item of `store_id` by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_in_store(
        &self,
        store_id: StoreId,
        id: ItemId,
    ) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "{SELECT_ITEM} WHERE id = ? AND store_id = ?"
        ))
        .bind(id)
        .bind(store_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    /// Set the current stock of an item in `store_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store has no such item.
    /// Returns `RepositoryError::Constraint` if the quantity is negative.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_current_stock(
        &self,
        store_id: StoreId,
        id: ItemId,
        current_stock: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE item SET current_stock = ? WHERE id = ? AND store_id = ?")
            .bind(current_stock)
            .bind(id)
            .bind(store_id)
            .execute(self.pool)
            .await
            .map_err(|e| map_write_error(e, "item rejected"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
