//! Session-related types.
//!
//! The session carries at most two identifiers: the selected household and the
//! selected member. Both are re-checked against the database on every request.

use pantry_core::{HouseholdId, MemberId};
use tower_sessions::Session;

/// Session keys for the login stages.
pub mod keys {
    /// Key for the selected household's id.
    pub const HOUSEHOLD_ID: &str = "household_id";

    /// Key for the selected member's id.
    pub const MEMBER_ID: &str = "member_id";
}

/// Identifiers currently stored in the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub household_id: Option<HouseholdId>,
    pub member_id: Option<MemberId>,
}

impl SessionContext {
    /// Read both identifiers from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or a value does not
    /// deserialize.
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        Ok(Self {
            household_id: session.get(keys::HOUSEHOLD_ID).await?,
            member_id: session.get(keys::MEMBER_ID).await?,
        })
    }
}
