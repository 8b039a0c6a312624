//! Member repository for database operations.
//!
//! Every lookup is scoped by household id. A member id that belongs to another
//! household behaves exactly like one that does not exist.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use pantry_core::{HouseholdId, MemberId, Name};

use super::{RepositoryError, map_write_error};
use crate::models::Member;

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: MemberId,
    household_id: HouseholdId,
    name: Name,
    created_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            id: row.id,
            household_id: row.household_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    member: MemberRow,
    password_hash: String,
}

/// Repository for member database operations.
pub struct MemberRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new member repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a member with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the household already has a member
    /// with this name.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        household_id: HouseholdId,
        name: &Name,
        password_hash: &str,
    ) -> Result<Member, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r"
            INSERT INTO member (household_id, name, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            ",
        )
        .bind(household_id)
        .bind(name)
        .bind(password_hash)
        .bind(created_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_write_error(e, "member name already exists"))?;

        Ok(Member {
            id: MemberId::new(result.last_insert_rowid()),
            household_id,
            name: name.clone(),
            created_at,
        })
    }

    /// List a household's members by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_household(
        &self,
        household_id: HouseholdId,
    ) -> Result<Vec<Member>, RepositoryError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r"
            SELECT id, household_id, name, created_at
            FROM member
            WHERE household_id = ?
            ORDER BY name, id
            ",
        )
        .bind(household_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    /// Get a member of `household_id` by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_in_household(
        &self,
        household_id: HouseholdId,
        id: MemberId,
    ) -> Result<Option<Member>, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r"
            SELECT id, household_id, name, created_at
            FROM member
            WHERE id = ? AND household_id = ?
            ",
        )
        .bind(id)
        .bind(household_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Member::from))
    }

    /// Get a member of `household_id` and their password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credentials(
        &self,
        household_id: HouseholdId,
        id: MemberId,
    ) -> Result<Option<(Member, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r"
            SELECT id, household_id, name, created_at, password_hash
            FROM member
            WHERE id = ? AND household_id = ?
            ",
        )
        .bind(id)
        .bind(household_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (Member::from(r.member), r.password_hash)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pantry_core::Address;

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

    #[tokio::test]
    async fn test_names_unique_per_household() {
        let pool = test_support::pool().await;
        let first = household(&pool, "1 First Street").await;
        let second = household(&pool, "2 Second Street").await;
        let repo = MemberRepository::new(&pool);
        let ann = Name::parse("Ann").unwrap();

        repo.create(first, &ann, "hash").await.unwrap();
        repo.create(second, &ann, "hash").await.unwrap();

        let err = repo
            .create(first, &Name::parse(" ANN ").unwrap(), "hash")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_lookups_are_scoped_to_household() {
        let pool = test_support::pool().await;
        let first = household(&pool, "1 First Street").await;
        let second = household(&pool, "2 Second Street").await;
        let repo = MemberRepository::new(&pool);

        let ann = repo
            .create(first, &Name::parse("ann").unwrap(), "hash")
            .await
            .unwrap();

        assert!(repo.get_in_household(first, ann.id).await.unwrap().is_some());
        assert!(repo.get_in_household(second, ann.id).await.unwrap().is_none());
        assert!(repo.get_credentials(second, ann.id).await.unwrap().is_none());

        let (member, hash) = repo.get_credentials(first, ann.id).await.unwrap().unwrap();
        assert_eq!(member.name.as_str(), "ann");
        assert_eq!(hash, "hash");
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let pool = test_support::pool().await;
        let id = household(&pool, "1 First Street").await;
        let repo = MemberRepository::new(&pool);

        for name in ["zoe", "ann", "mia"] {
            repo.create(id, &Name::parse(name).unwrap(), "hash")
                .await
                .unwrap();
        }

        let names: Vec<_> = repo
            .list_for_household(id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name.into_inner())
            .collect();
        assert_eq!(names, vec!["ann", "mia", "zoe"]);
    }
}
