//! Authentication error types.
//!
//! The `Display` text of the credential variants is shown to users as-is.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown address or wrong passcode. Deliberately indistinguishable.
    #[error("Invalid address or passcode.")]
    InvalidCredentials,

    /// Wrong member password.
    #[error("Invalid password.")]
    InvalidPassword,

    /// Member id not found in the session's household.
    #[error("not found")]
    MemberNotFound,

    /// A household already exists at this address.
    #[error("Household address already exists. Please try again.")]
    HouseholdExists,

    /// The household already has a member with this name.
    #[error("A member with this name already exists.")]
    MemberExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
