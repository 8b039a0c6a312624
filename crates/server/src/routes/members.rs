//! Member stage route handlers.
//!
//! Every handler here requires a selected household. Member ids are always
//! resolved within that household, so a member of another household is
//! simply not found.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::db::MemberRepository;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::forms::{FieldErrors, MemberCreateForm, MemberSelectForm};
use crate::middleware::{HouseholdSession, clear_member, set_member};
use crate::models::{Household, Member};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

use super::{Nav, NoticeQuery};

// =============================================================================
// Templates
// =============================================================================

/// Member login page template.
#[derive(Template, WebTemplate)]
#[template(path = "member/select.html")]
pub struct MemberSelectTemplate {
    pub nav: Nav,
    pub members: Vec<Member>,
    pub form: MemberSelectForm,
    pub errors: FieldErrors,
    pub notice: Option<&'static str>,
}

/// Member signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "member/create.html")]
pub struct MemberCreateTemplate {
    pub nav: Nav,
    pub form: MemberCreateForm,
    pub errors: FieldErrors,
}

// =============================================================================
// Login
// =============================================================================

/// Display the household's members. With no members yet, go to signup.
pub async fn select_page(
    State(state): State<AppState>,
    HouseholdSession { household, .. }: HouseholdSession,
    Query(query): Query<NoticeQuery>,
) -> Result<Response> {
    let members = MemberRepository::new(state.pool())
        .list_for_household(household.id)
        .await?;

    if members.is_empty() {
        return Ok(Redirect::to("/member/create").into_response());
    }

    let template = MemberSelectTemplate {
        nav: Nav::household(&household),
        members,
        form: MemberSelectForm::default(),
        errors: FieldErrors::new(),
        notice: query.message(),
    };
    Ok(template.into_response())
}

/// Handle member login.
pub async fn select(
    State(state): State<AppState>,
    HouseholdSession {
        session, household, ..
    }: HouseholdSession,
    Form(form): Form<MemberSelectForm>,
) -> Result<Response> {
    let login = match form.validate() {
        Ok(login) => login,
        Err(errors) => {
            return render_select(&state, &household, StatusCode::UNPROCESSABLE_ENTITY, form, errors)
                .await;
        }
    };

    match AuthService::new(state.pool())
        .login_member(household.id, &login)
        .await
    {
        Ok(member) => {
            set_member(&session, member.id).await?;
            set_sentry_user(&member.id);
            tracing::info!(household_id = %household.id, member_id = %member.id, "member signed in");
            Ok(Redirect::to("/stores").into_response())
        }
        Err(err @ AuthError::InvalidPassword) => {
            tracing::info!(household_id = %household.id, member_id = %login.member_id, "member sign-in rejected");
            render_select(
                &state,
                &household,
                StatusCode::UNAUTHORIZED,
                form,
                FieldErrors::form(err.to_string()),
            )
            .await
        }
        Err(err) => Err(err.into()),
    }
}

async fn render_select(
    state: &AppState,
    household: &Household,
    status: StatusCode,
    form: MemberSelectForm,
    errors: FieldErrors,
) -> Result<Response> {
    let members = MemberRepository::new(state.pool())
        .list_for_household(household.id)
        .await?;

    let template = MemberSelectTemplate {
        nav: Nav::household(household),
        members,
        form,
        errors,
        notice: None,
    };
    Ok((status, template).into_response())
}

// =============================================================================
// Signup
// =============================================================================

/// Display the member signup page.
pub async fn create_page(HouseholdSession { household, .. }: HouseholdSession) -> impl IntoResponse {
    MemberCreateTemplate {
        nav: Nav::household(&household),
        form: MemberCreateForm::default(),
        errors: FieldErrors::new(),
    }
}

/// Handle member signup. The new member is signed in right away.
pub async fn create(
    State(state): State<AppState>,
    HouseholdSession {
        session, household, ..
    }: HouseholdSession,
    Form(form): Form<MemberCreateForm>,
) -> Result<Response> {
    let new_member = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            return Ok(render_create(
                &household,
                StatusCode::UNPROCESSABLE_ENTITY,
                form,
                errors,
            ));
        }
    };

    match AuthService::new(state.pool())
        .register_member(household.id, &new_member)
        .await
    {
        Ok(member) => {
            set_member(&session, member.id).await?;
            set_sentry_user(&member.id);
            tracing::info!(household_id = %household.id, member_id = %member.id, "member created");
            Ok(Redirect::to("/stores").into_response())
        }
        Err(err @ AuthError::MemberExists) => {
            let mut errors = FieldErrors::new();
            errors.push("name", err.to_string());
            Ok(render_create(&household, StatusCode::CONFLICT, form, errors))
        }
        Err(err) => Err(err.into()),
    }
}

fn render_create(
    household: &Household,
    status: StatusCode,
    form: MemberCreateForm,
    errors: FieldErrors,
) -> Response {
    let template = MemberCreateTemplate {
        nav: Nav::household(household),
        form,
        errors,
    };
    (status, template).into_response()
}

// =============================================================================
// Logout
// =============================================================================

/// Forget the member but keep the household selected.
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_member(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/member/select?notice=signed_out"))
}
