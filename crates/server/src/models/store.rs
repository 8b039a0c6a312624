//! Store domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pantry_core::{Address, HouseholdId, Name, StoreId};

/// A shopping location belonging to one household.
#[derive(Debug, Clone, Serialize)]
pub struct Store {
    pub id: StoreId,
    pub household_id: HouseholdId,
    pub name: Name,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a store.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: Name,
    pub address: Option<Address>,
}
