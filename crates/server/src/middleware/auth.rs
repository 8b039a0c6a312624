//! Login-stage guards and extractors.
//!
//! Pages sit behind a chain of stages: household, then member. Each stage is
//! an axum extractor that reads the id from the session, re-checks it against
//! the database, and redirects to the earlier stage when it is missing.
//! A stale id (its row is gone) is removed from the session before
//! redirecting, so the client cannot loop on it.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use pantry_core::{HouseholdId, MemberId};

use crate::db::{HouseholdRepository, MemberRepository, RepositoryError};
use crate::error::AppError;
use crate::models::session::keys;
use crate::models::{Household, Member, SessionContext};
use crate::state::AppState;

/// Why a request was sent back to an earlier login stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// No household selected yet.
    NoHousehold,
    /// The selected household no longer exists.
    StaleHousehold,
    /// No member selected yet.
    NoMember,
    /// The selected member no longer exists.
    StaleMember,
}

impl RedirectReason {
    /// Where to send the client.
    #[must_use]
    pub const fn location(self) -> &'static str {
        match self {
            Self::NoHousehold => "/household/select",
            Self::StaleHousehold => "/household/select?notice=session_expired",
            Self::NoMember => "/member/select",
            Self::StaleMember => "/member/select?notice=session_expired",
        }
    }
}

impl IntoResponse for RedirectReason {
    fn into_response(self) -> Response {
        Redirect::to(self.location()).into_response()
    }
}

impl SessionContext {
    /// The selected household id.
    ///
    /// # Errors
    ///
    /// Returns `RedirectReason::NoHousehold` if none is selected.
    pub const fn require_household(&self) -> Result<HouseholdId, RedirectReason> {
        match self.household_id {
            Some(id) => Ok(id),
            None => Err(RedirectReason::NoHousehold),
        }
    }

    /// The selected household and member ids.
    ///
    /// # Errors
    ///
    /// Returns `RedirectReason::NoHousehold` if no household is selected, or
    /// `RedirectReason::NoMember` if no member is.
    pub const fn require_member(&self) -> Result<(HouseholdId, MemberId), RedirectReason> {
        match (self.household_id, self.member_id) {
            (None, _) => Err(RedirectReason::NoHousehold),
            (Some(_), None) => Err(RedirectReason::NoMember),
            (Some(household), Some(member)) => Ok((household, member)),
        }
    }
}

/// Rejection for the login-stage extractors.
pub enum GuardRejection {
    /// Send the client to an earlier stage.
    Redirect(RedirectReason),
    /// The session or database failed.
    Error(AppError),
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(reason) => reason.into_response(),
            Self::Error(err) => err.into_response(),
        }
    }
}

impl From<RedirectReason> for GuardRejection {
    fn from(reason: RedirectReason) -> Self {
        Self::Redirect(reason)
    }
}

impl From<AppError> for GuardRejection {
    fn from(err: AppError) -> Self {
        Self::Error(err)
    }
}

impl From<tower_sessions::session::Error> for GuardRejection {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Error(AppError::Session(err))
    }
}

/// Extractor that requires a selected household.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(HouseholdSession { household, .. }: HouseholdSession) -> impl IntoResponse {
///     household.address.to_string()
/// }
/// ```
pub struct HouseholdSession {
    pub session: Session,
    pub household: Household,
}

impl FromRequestParts<AppState> for HouseholdSession {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        let context = SessionContext::load(&session).await?;
        let household = resolve_household(&session, &context, state).await?;

        Ok(Self { session, household })
    }
}

/// Extractor that requires a selected household and member.
///
/// Implies [`HouseholdSession`]: the household is resolved first.
pub struct MemberSession {
    pub session: Session,
    pub household: Household,
    pub member: Member,
}

impl FromRequestParts<AppState> for MemberSession {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        let context = SessionContext::load(&session).await?;
        let household = resolve_household(&session, &context, state).await?;
        let (household_id, member_id) = context.require_member()?;

        let Some(member) = MemberRepository::new(state.pool())
            .get_in_household(household_id, member_id)
            .await?
        else {
            tracing::info!(%member_id, "member in session no longer exists");
            session.remove::<MemberId>(keys::MEMBER_ID).await?;
            return Err(RedirectReason::StaleMember.into());
        };

        Ok(Self {
            session,
            household,
            member,
        })
    }
}

fn session_from_parts(parts: &Parts) -> Result<Session, GuardRejection> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer missing".to_string()).into())
}

async fn resolve_household(
    session: &Session,
    context: &SessionContext,
    state: &AppState,
) -> Result<Household, GuardRejection> {
    let household_id = context.require_household()?;

    match HouseholdRepository::new(state.pool())
        .get_by_id(household_id)
        .await?
    {
        Some(household) => Ok(household),
        None => {
            tracing::info!(%household_id, "household in session no longer exists");
            session.remove::<HouseholdId>(keys::HOUSEHOLD_ID).await?;
            session.remove::<MemberId>(keys::MEMBER_ID).await?;
            Err(RedirectReason::StaleHousehold.into())
        }
    }
}

// =============================================================================
// Session helpers
// =============================================================================

/// Select a household. Cycles the session id and drops any selected member.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_household(
    session: &Session,
    household_id: HouseholdId,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.remove::<MemberId>(keys::MEMBER_ID).await?;
    session.insert(keys::HOUSEHOLD_ID, household_id).await
}

/// Select a member of the current household. Cycles the session id.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_member(
    session: &Session,
    member_id: MemberId,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(keys::MEMBER_ID, member_id).await
}

/// Drop the selected member but keep the household.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_member(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<MemberId>(keys::MEMBER_ID).await?;
    Ok(())
}

/// Forget everything (household logout).
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

impl From<RepositoryError> for GuardRejection {
    fn from(err: RepositoryError) -> Self {
        Self::Error(AppError::Database(err))
    }
}
