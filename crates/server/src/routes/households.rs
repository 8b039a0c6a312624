//! Household stage route handlers.
//!
//! Login failures never reveal whether the address exists: an unknown address
//! and a wrong passcode produce the same message and status.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::{Result, clear_sentry_user};
use crate::forms::{FieldErrors, HouseholdCreateForm, HouseholdSelectForm};
use crate::middleware::{clear_session, set_household};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

use super::{Nav, NoticeQuery};

// =============================================================================
// Templates
// =============================================================================

/// Household login page template.
#[derive(Template, WebTemplate)]
#[template(path = "household/select.html")]
pub struct HouseholdSelectTemplate {
    pub nav: Nav,
    pub form: HouseholdSelectForm,
    pub errors: FieldErrors,
    pub notice: Option<&'static str>,
}

/// Household signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "household/create.html")]
pub struct HouseholdCreateTemplate {
    pub nav: Nav,
    pub form: HouseholdCreateForm,
    pub errors: FieldErrors,
}

// =============================================================================
// Login
// =============================================================================

/// Display the household login page.
pub async fn select_page(Query(query): Query<NoticeQuery>) -> impl IntoResponse {
    HouseholdSelectTemplate {
        nav: Nav::default(),
        form: HouseholdSelectForm::default(),
        errors: FieldErrors::new(),
        notice: query.message(),
    }
}

/// Handle household login.
///
/// On success the session id is cycled, the household is stored, any member
/// selection is dropped, and the client moves on to member selection.
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<HouseholdSelectForm>,
) -> Result<Response> {
    let login = match form.validate() {
        Ok(login) => login,
        Err(errors) => return Ok(render_select(StatusCode::UNPROCESSABLE_ENTITY, form, errors)),
    };

    match AuthService::new(state.pool()).login_household(&login).await {
        Ok(household) => {
            set_household(&session, household.id).await?;
            tracing::info!(household_id = %household.id, "household signed in");
            Ok(Redirect::to("/member/select").into_response())
        }
        Err(err @ AuthError::InvalidCredentials) => {
            tracing::info!("household sign-in rejected");
            Ok(render_select(
                StatusCode::UNAUTHORIZED,
                form,
                FieldErrors::form(err.to_string()),
            ))
        }
        Err(err) => Err(err.into()),
    }
}

fn render_select(status: StatusCode, form: HouseholdSelectForm, errors: FieldErrors) -> Response {
    let template = HouseholdSelectTemplate {
        nav: Nav::default(),
        form,
        errors,
        notice: None,
    };
    (status, template).into_response()
}

// =============================================================================
// Signup
// =============================================================================

/// Display the household signup page.
pub async fn create_page() -> impl IntoResponse {
    HouseholdCreateTemplate {
        nav: Nav::default(),
        form: HouseholdCreateForm::default(),
        errors: FieldErrors::new(),
    }
}

/// Handle household signup. The new household is signed in right away.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<HouseholdCreateForm>,
) -> Result<Response> {
    let new_household = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return Ok(render_create(StatusCode::UNPROCESSABLE_ENTITY, form, errors)),
    };

    match AuthService::new(state.pool())
        .register_household(&new_household)
        .await
    {
        Ok(household) => {
            set_household(&session, household.id).await?;
            tracing::info!(household_id = %household.id, "household created");
            Ok(Redirect::to("/member/create").into_response())
        }
        Err(err @ AuthError::HouseholdExists) => Ok(render_create(
            StatusCode::CONFLICT,
            form,
            FieldErrors::form(err.to_string()),
        )),
        Err(err) => Err(err.into()),
    }
}

fn render_create(status: StatusCode, form: HouseholdCreateForm, errors: FieldErrors) -> Response {
    let template = HouseholdCreateTemplate {
        nav: Nav::default(),
        form,
        errors,
    };
    (status, template).into_response()
}

// =============================================================================
// Logout
// =============================================================================

/// Forget the household and member.
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_session(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/household/select?notice=signed_out"))
}
