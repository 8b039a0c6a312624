//! HTTP middleware stack for the Pantry server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (recorded on the span, echoed in the response)
//! 4. Security headers
//! 5. Session layer (tower-sessions, `SQLite` store)
//! 6. Rate limiting on the household and member routes (governor)
//!
//! Login-stage guards are extractors rather than layers; see [`auth`].

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{
    GuardRejection, HouseholdSession, MemberSession, RedirectReason, clear_member, clear_session,
    set_household, set_member,
};
pub use rate_limit::{RateLimiterLayer, login_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer, sqlite_store};
