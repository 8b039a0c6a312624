//! Authentication service.
//!
//! Two credential stages: a household logs in with its address and passcode,
//! then a member of that household logs in with their password. Passcodes and
//! passwords are stored as Argon2id PHC strings.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use pantry_core::HouseholdId;

use crate::db::{HouseholdRepository, MemberRepository, RepositoryError};
use crate::forms::{HouseholdLogin, MemberLogin, NewHousehold, NewMember};
use crate::models::{Household, Member};

/// Hash verified in place of a real one when an address is unknown, so both
/// failed-login paths pay for one Argon2 verification.
static DUMMY_PASSCODE_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_secret("pantry-unknown-household").ok());

/// Authentication service.
///
/// Handles household and member registration and login.
pub struct AuthService<'a> {
    households: HouseholdRepository<'a>,
    members: MemberRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            households: HouseholdRepository::new(pool),
            members: MemberRepository::new(pool),
        }
    }

    // =========================================================================
    // Households
    // =========================================================================

    /// Register a household.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HouseholdExists` if the address is already taken.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub async fn register_household(&self, form: &NewHousehold) -> Result<Household, AuthError> {
        let passcode_hash = hash_secret(form.passcode.expose_secret())?;

        self.households
            .create(&form.address, &passcode_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::HouseholdExists,
                other => AuthError::Repository(other),
            })
    }

    /// Log a household in with its address and passcode.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown address and for a
    /// wrong passcode alike.
    pub async fn login_household(&self, login: &HouseholdLogin) -> Result<Household, AuthError> {
        let Some((household, passcode_hash)) =
            self.households.get_credentials(&login.address).await?
        else {
            if let Some(dummy) = DUMMY_PASSCODE_HASH.as_deref() {
                let _ = verify_secret(login.passcode.expose_secret(), dummy);
            }
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_secret(login.passcode.expose_secret(), &passcode_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(household)
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Register a member of `household_id`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MemberExists` if the name is taken in this household.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub async fn register_member(
        &self,
        household_id: HouseholdId,
        form: &NewMember,
    ) -> Result<Member, AuthError> {
        let password_hash = hash_secret(form.password.expose_secret())?;

        self.members
            .create(household_id, &form.name, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::MemberExists,
                other => AuthError::Repository(other),
            })
    }

    /// Log a member of `household_id` in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MemberNotFound` if the member does not belong to
    /// this household.
    /// Returns `AuthError::InvalidPassword` if the password does not match.
    pub async fn login_member(
        &self,
        household_id: HouseholdId,
        login: &MemberLogin,
    ) -> Result<Member, AuthError> {
        let (member, password_hash) = self
            .members
            .get_credentials(household_id, login.member_id)
            .await?
            .ok_or(AuthError::MemberNotFound)?;

        if !verify_secret(login.password.expose_secret(), &password_hash) {
            return Err(AuthError::InvalidPassword);
        }

        Ok(member)
    }
}

// =============================================================================
// Hashing
// =============================================================================

/// Hash a passcode or password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_secret(secret: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a passcode or password against a stored hash.
///
/// A malformed stored hash never verifies.
#[must_use]
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("stored credential hash is malformed");
        return false;
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok()
}
