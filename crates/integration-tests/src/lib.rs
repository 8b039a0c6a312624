//! Integration tests for Pantry.
//!
//! Each test builds the full router over a fresh in-memory database and drives
//! it in-process, carrying the session cookie between requests the way a
//! browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pantry-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use pantry_server::config::PantryConfig;
use pantry_server::db;
use pantry_server::middleware::SESSION_COOKIE_NAME;
use pantry_server::state::AppState;

/// A response reduced to what the tests inspect.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Redirect target, panicking if the response is not a redirect.
    #[must_use]
    pub fn redirect_target(&self) -> &str {
        assert!(
            self.status.is_redirection(),
            "expected a redirect, got {} with body:\n{}",
            self.status,
            self.body
        );
        self.location.as_deref().unwrap()
    }
}

/// An application instance with one browser's cookie jar.
pub struct TestApp {
    router: Router,
    pool: SqlitePool,
    cookie: Option<String>,
}

impl TestApp {
    /// Build the app over a freshly migrated in-memory database.
    pub async fn spawn() -> Self {
        let pool = db::create_memory_pool().await.unwrap();
        db::run_migrations(&pool).await.unwrap();

        let state = AppState::new(test_config(), pool.clone());
        let router = pantry_server::app(state, MemoryStore::default(), None);

        Self {
            router,
            pool,
            cookie: None,
        }
    }

    /// A second browser on the same server, with an empty cookie jar.
    #[must_use]
    pub fn new_client(&self) -> Self {
        Self {
            router: self.router.clone(),
            pool: self.pool.clone(),
            cookie: None,
        }
    }

    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let value = value.to_str().unwrap();
            let Some(pair) = value.split(';').next() else {
                continue;
            };
            if !pair.starts_with(SESSION_COOKIE_NAME) {
                continue;
            }
            // A flushed session is sent back with an empty value.
            let cleared = pair.trim_end() == format!("{SESSION_COOKIE_NAME}=");
            self.cookie = if cleared { None } else { Some(pair.to_string()) };
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    // =========================================================================
    // Flow helpers
    // =========================================================================

    /// Register a household; the session is left at the household stage.
    pub async fn create_household(&mut self, street: &str, passcode: &str) -> TestResponse {
        self.post_form(
            "/household/create",
            &[
                ("street_address", street),
                ("city", "Springfield"),
                ("state", "IL"),
                ("zip_code", "62704"),
                ("passcode", passcode),
                ("passcode_confirmation", passcode),
            ],
        )
        .await
    }

    /// Log in to a household registered by [`Self::create_household`].
    pub async fn select_household(&mut self, street: &str, passcode: &str) -> TestResponse {
        self.post_form(
            "/household/select",
            &[
                ("street_address", street),
                ("city", "Springfield"),
                ("state", "IL"),
                ("zip_code", "62704"),
                ("passcode", passcode),
            ],
        )
        .await
    }

    /// Register a member of the current household; the member is signed in.
    pub async fn create_member(&mut self, name: &str, password: &str) -> TestResponse {
        self.post_form(
            "/member/create",
            &[
                ("name", name),
                ("password", password),
                ("password_confirmation", password),
            ],
        )
        .await
    }

    pub async fn select_member(&mut self, member_id: i64, password: &str) -> TestResponse {
        self.post_form(
            "/member/select",
            &[("member_id", &member_id.to_string()), ("password", password)],
        )
        .await
    }

    /// Create a store without an address and return its id.
    pub async fn create_store(&mut self, name: &str) -> i64 {
        let response = self.post_form("/stores/create", &[("name", name)]).await;
        id_after(response.redirect_target(), "/stores/")
    }

    /// Create an item and return the response.
    pub async fn create_item(
        &mut self,
        store_id: i64,
        name: &str,
        current: i64,
        ideal: i64,
        minimum: i64,
    ) -> TestResponse {
        self.post_form(
            &format!("/stores/{store_id}/items/create"),
            &[
                ("name", name),
                ("price", "1.50"),
                ("current_stock", &current.to_string()),
                ("ideal_stock", &ideal.to_string()),
                ("minimum_stock", &minimum.to_string()),
            ],
        )
        .await
    }

    /// Household, member and an empty store, signed in as the member.
    pub async fn signed_in_with_store(&mut self, street: &str) -> i64 {
        self.create_household(street, "open-sesame").await;
        self.create_member("Alex", "correct horse").await;
        self.create_store("Corner Market").await
    }
}

/// Numeric id following `prefix` in a path such as `/stores/7/items`.
#[must_use]
pub fn id_after(path: &str, prefix: &str) -> i64 {
    let rest = path.strip_prefix(prefix).unwrap();
    rest.split('/').next().unwrap().parse().unwrap()
}

/// Byte offset of `needle` in `haystack`, panicking if absent.
#[must_use]
pub fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in page"))
}

fn test_config() -> PantryConfig {
    PantryConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost".to_string(),
        log_json: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}
