//! Store route handlers. All require a signed-in member.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::db::{RepositoryError, StoreRepository};
use crate::error::Result;
use crate::forms::{FieldErrors, StoreCreateForm};
use crate::middleware::MemberSession;
use crate::models::Store;
use crate::state::AppState;

use super::Nav;

/// Store list page template.
#[derive(Template, WebTemplate)]
#[template(path = "store/list.html")]
pub struct StoreListTemplate {
    pub nav: Nav,
    pub stores: Vec<Store>,
}

/// Store creation page template.
#[derive(Template, WebTemplate)]
#[template(path = "store/create.html")]
pub struct StoreCreateTemplate {
    pub nav: Nav,
    pub form: StoreCreateForm,
    pub errors: FieldErrors,
}

/// List the household's stores.
pub async fn index(
    State(state): State<AppState>,
    MemberSession {
        household, member, ..
    }: MemberSession,
) -> Result<impl IntoResponse> {
    let stores = StoreRepository::new(state.pool())
        .list_for_household(household.id)
        .await?;

    Ok(StoreListTemplate {
        nav: Nav::member(&household, &member),
        stores,
    })
}

/// Display the store creation page.
pub async fn create_page(
    MemberSession {
        household, member, ..
    }: MemberSession,
) -> impl IntoResponse {
    StoreCreateTemplate {
        nav: Nav::member(&household, &member),
        form: StoreCreateForm::default(),
        errors: FieldErrors::new(),
    }
}

/// Handle store creation.
pub async fn create(
    State(state): State<AppState>,
    MemberSession {
        household, member, ..
    }: MemberSession,
    Form(form): Form<StoreCreateForm>,
) -> Result<Response> {
    let nav = Nav::member(&household, &member);

    let new_store = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            return Ok(render_create(nav, StatusCode::UNPROCESSABLE_ENTITY, form, errors));
        }
    };

    match StoreRepository::new(state.pool())
        .create(household.id, &new_store)
        .await
    {
        Ok(store) => {
            tracing::info!(household_id = %household.id, store_id = %store.id, "store created");
            Ok(Redirect::to(&format!("/stores/{}/items", store.id)).into_response())
        }
        Err(RepositoryError::Conflict(_)) => {
            let mut errors = FieldErrors::new();
            errors.push("name", "A store with this name already exists.");
            Ok(render_create(nav, StatusCode::CONFLICT, form, errors))
        }
        Err(err) => Err(err.into()),
    }
}

fn render_create(
    nav: Nav,
    status: StatusCode,
    form: StoreCreateForm,
    errors: FieldErrors,
) -> Response {
    let template = StoreCreateTemplate { nav, form, errors };
    (status, template).into_response()
}
