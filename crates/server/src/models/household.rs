//! Household domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pantry_core::{Address, HouseholdId};

/// A household, identified by its normalized address.
///
/// The passcode hash is never part of the model. It is only read by the
/// authentication service through [`crate::db::HouseholdRepository`].
#[derive(Debug, Clone, Serialize)]
pub struct Household {
    pub id: HouseholdId,
    pub address: Address,
    pub created_at: DateTime<Utc>,
}

/// Household row with its member count, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdSummary {
    pub household: Household,
    pub member_count: i64,
}
