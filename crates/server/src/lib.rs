//! Pantry server library.
//!
//! Household inventory tracking behind a two-stage login: a household signs
//! in with its address and passcode, then one of its members signs in with
//! a password. Members manage stores and the items stocked at each store.
//!
//! The crate is a library so the integration tests can drive the same router
//! the binary serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionStore;
use tracing::Span;

use crate::middleware::{
    RateLimiterLayer, create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Directory served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the application router with its middleware stack.
///
/// Sessions live in `session_store`. When `limiter` is given, the household
/// and member login and signup submissions are rate limited.
pub fn app<S>(state: AppState, session_store: S, limiter: Option<&RateLimiterLayer>) -> Router
where
    S: SessionStore + Clone,
{
    let secure = state.config().secure_cookies();
    let routes = limiter.map_or_else(routes::routes, routes::rate_limited_routes);

    Router::new()
        .merge(routes)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(create_session_layer(session_store, secure))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
