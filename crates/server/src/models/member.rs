//! Member domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pantry_core::{HouseholdId, MemberId, Name};

/// A person belonging to one household.
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub id: MemberId,
    pub household_id: HouseholdId,
    pub name: Name,
    pub created_at: DateTime<Utc>,
}
