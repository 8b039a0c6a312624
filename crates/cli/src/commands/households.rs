//! Household inspection commands.

use sqlx::SqlitePool;

use pantry_server::db::{HouseholdRepository, RepositoryError};

/// Print every household with its member count.
#[allow(clippy::print_stdout)]
pub async fn list(pool: &SqlitePool) -> Result<(), RepositoryError> {
    let summaries = HouseholdRepository::new(pool)
        .list_with_member_counts()
        .await?;

    if summaries.is_empty() {
        tracing::info!("No households registered");
        return Ok(());
    }

    for summary in &summaries {
        println!(
            "{:>6}  {:<50}  {} member(s)  since {}",
            summary.household.id,
            summary.household.address.to_string(),
            summary.member_count,
            summary.household.created_at.format("%Y-%m-%d"),
        );
    }

    Ok(())
}
