//! HTTP route handlers for the Pantry server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                      - Home page
//! GET  /health                                - Liveness check
//! GET  /health/ready                          - Readiness check (database)
//!
//! # Household stage
//! GET  /household/select                      - Household login page
//! POST /household/select                      - Household login action
//! GET  /household/create                      - Household signup page
//! POST /household/create                      - Household signup action
//! POST /household/logout                      - Forget household and member
//!
//! # Member stage (requires household)
//! GET  /member/select                         - Member login page
//! POST /member/select                         - Member login action
//! GET  /member/create                         - Member signup page
//! POST /member/create                         - Member signup action
//! POST /member/logout                         - Forget member, keep household
//!
//! # Stores and items (requires member)
//! GET  /stores                                - Store list
//! GET  /stores/create                         - Store form
//! POST /stores/create                         - Create store
//! GET  /stores/{store_id}/items               - Items ranked by stock ratio
//! GET  /stores/{store_id}/items/create        - Item form
//! POST /stores/{store_id}/items/create        - Create item
//! POST /stores/{store_id}/items/{item_id}/stock - Update current stock
//! ```
//!
//! Static files are mounted by [`crate::app`].

pub mod health;
pub mod home;
pub mod households;
pub mod items;
pub mod members;
pub mod stores;

use axum::{
    Router,
    routing::{MethodRouter, get, post},
};
use serde::Deserialize;

use crate::middleware::RateLimiterLayer;
use crate::models::{Household, Member};
use crate::state::AppState;

// =============================================================================
// Shared view types
// =============================================================================

/// Who is signed in, for the page header.
#[derive(Debug, Default)]
pub struct Nav {
    pub household: Option<String>,
    pub member: Option<String>,
}

impl Nav {
    #[must_use]
    pub fn household(household: &Household) -> Self {
        Self {
            household: Some(household.address.to_string()),
            member: None,
        }
    }

    #[must_use]
    pub fn member(household: &Household, member: &Member) -> Self {
        Self {
            household: Some(household.address.to_string()),
            member: Some(member.name.to_string()),
        }
    }
}

/// Query parameters for one-off notices.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    /// Human-readable text for a known notice code.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self.notice.as_deref()? {
            "session_expired" => Some("Your session has expired. Please sign in again."),
            "signed_out" => Some("You have been signed out."),
            _ => None,
        }
    }
}

// =============================================================================
// Routers
// =============================================================================

fn limited(
    method_router: MethodRouter<AppState>,
    limiter: Option<&RateLimiterLayer>,
) -> MethodRouter<AppState> {
    match limiter {
        Some(layer) => method_router.layer(layer.clone()),
        None => method_router,
    }
}

/// Create the household routes router.
pub fn household_routes(limiter: Option<&RateLimiterLayer>) -> Router<AppState> {
    Router::new()
        .route(
            "/select",
            get(households::select_page).merge(limited(post(households::select), limiter)),
        )
        .route(
            "/create",
            get(households::create_page).merge(limited(post(households::create), limiter)),
        )
        .route("/logout", post(households::logout))
}

/// Create the member routes router.
pub fn member_routes(limiter: Option<&RateLimiterLayer>) -> Router<AppState> {
    Router::new()
        .route(
            "/select",
            get(members::select_page).merge(limited(post(members::select), limiter)),
        )
        .route(
            "/create",
            get(members::create_page).merge(limited(post(members::create), limiter)),
        )
        .route("/logout", post(members::logout))
}

/// Create the store and item routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stores::index))
        .route("/create", get(stores::create_page).post(stores::create))
        .route("/{store_id}/items", get(items::index))
        .route(
            "/{store_id}/items/create",
            get(items::create_page).post(items::create),
        )
        .route(
            "/{store_id}/items/{item_id}/stock",
            post(items::update_stock),
        )
}

fn build(limiter: Option<&RateLimiterLayer>) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/household", household_routes(limiter))
        .nest("/member", member_routes(limiter))
        .nest("/stores", store_routes())
}

/// Create all page routes without rate limiting.
pub fn routes() -> Router<AppState> {
    build(None)
}

/// Create all page routes, rate limiting the login and signup submissions.
///
/// The limiter keys on the client IP; serve the app with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn rate_limited_routes(limiter: &RateLimiterLayer) -> Router<AppState> {
    build(Some(limiter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        let notice = |code: &str| NoticeQuery {
            notice: Some(code.to_string()),
        };
        assert!(notice("session_expired").message().is_some());
        assert!(notice("signed_out").message().is_some());
        assert_eq!(notice("<script>").message(), None);
        assert_eq!(NoticeQuery::default().message(), None);
    }
}
