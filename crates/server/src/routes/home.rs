//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::error::Result;
use crate::models::SessionContext;

use super::Nav;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub has_household: bool,
    pub has_member: bool,
}

/// Display the home page, pointing at the next login stage.
///
/// Only looks at which ids the session holds; the stage pages re-check them.
pub async fn home(session: Session) -> Result<impl IntoResponse> {
    let context = SessionContext::load(&session).await?;

    Ok(HomeTemplate {
        nav: Nav::default(),
        has_household: context.household_id.is_some(),
        has_member: context.member_id.is_some(),
    })
}
