//! Item route handlers: the stock-ranking view, item creation, and stock
//! updates.
//!
//! The store in the URL is always resolved within the session's household;
//! a store of another household is a 404.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use pantry_core::{HouseholdId, ItemId, StoreId};

use crate::db::{ItemRepository, RepositoryError, StoreRepository};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::forms::{FieldErrors, ItemCreateForm, StockUpdateForm};
use crate::middleware::MemberSession;
use crate::models::{Item, Store};
use crate::state::AppState;

use super::Nav;

/// Stock-ranking page template.
#[derive(Template, WebTemplate)]
#[template(path = "item/list.html")]
pub struct ItemListTemplate {
    pub nav: Nav,
    pub store: Store,
    /// Items ordered by ascending stock ratio.
    pub rows: Vec<ItemRow>,
}

/// One item of the stock-ranking page.
pub struct ItemRow {
    pub item: Item,
    /// Message from a rejected stock update of this item.
    pub stock_error: Option<String>,
}

/// Item creation page template.
#[derive(Template, WebTemplate)]
#[template(path = "item/create.html")]
pub struct ItemCreateTemplate {
    pub nav: Nav,
    pub store: Store,
    pub form: ItemCreateForm,
    pub errors: FieldErrors,
}

async fn find_store(state: &AppState, household_id: HouseholdId, store_id: StoreId) -> Result<Store> {
    StoreRepository::new(state.pool())
        .get_in_household(household_id, store_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("store {store_id}")))
}

async fn render_list(
    state: &AppState,
    nav: Nav,
    store: Store,
    status: StatusCode,
    stock_error: Option<(ItemId, String)>,
) -> Result<Response> {
    let items = ItemRepository::new(state.pool())
        .list_for_store(store.id)
        .await?;

    let rows = Item::rank(items)
        .into_iter()
        .map(|item| {
            let stock_error = match &stock_error {
                Some((id, message)) if *id == item.id => Some(message.clone()),
                _ => None,
            };
            ItemRow { item, stock_error }
        })
        .collect();

    let template = ItemListTemplate { nav, store, rows };
    Ok((status, template).into_response())
}

/// Show a store's items, most urgently understocked first.
pub async fn index(
    State(state): State<AppState>,
    MemberSession {
        household, member, ..
    }: MemberSession,
    Path(store_id): Path<StoreId>,
) -> Result<Response> {
    let store = find_store(&state, household.id, store_id).await?;
    render_list(&state, Nav::member(&household, &member), store, StatusCode::OK, None).await
}

/// Display the item creation page.
pub async fn create_page(
    State(state): State<AppState>,
    MemberSession {
        household, member, ..
    }: MemberSession,
    Path(store_id): Path<StoreId>,
) -> Result<impl IntoResponse> {
    let store = find_store(&state, household.id, store_id).await?;

    Ok(ItemCreateTemplate {
        nav: Nav::member(&household, &member),
        store,
        form: ItemCreateForm::default(),
        errors: FieldErrors::new(),
    })
}

/// Handle item creation. Nothing is written unless every field validates.
pub async fn create(
    State(state): State<AppState>,
    MemberSession {
        household, member, ..
    }: MemberSession,
    Path(store_id): Path<StoreId>,
    Form(form): Form<ItemCreateForm>,
) -> Result<Response> {
    let store = find_store(&state, household.id, store_id).await?;
    let nav = Nav::member(&household, &member);

    let new_item = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            let template = ItemCreateTemplate {
                nav,
                store,
                form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    match ItemRepository::new(state.pool()).create(store.id, &new_item).await {
        Ok(item) => {
            tracing::info!(store_id = %store.id, item_id = %item.id, "item created");
            Ok(Redirect::to(&format!("/stores/{}/items", store.id)).into_response())
        }
        Err(RepositoryError::Constraint(message)) => {
            tracing::warn!(store_id = %store.id, %message, "item rejected by storage constraint");
            let template = ItemCreateTemplate {
                nav,
                store,
                form,
                errors: FieldErrors::form("The item could not be saved. Check the stock levels."),
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Set an item's current stock.
pub async fn update_stock(
    State(state): State<AppState>,
    MemberSession {
        household, member, ..
    }: MemberSession,
    Path((store_id, item_id)): Path<(StoreId, ItemId)>,
    Form(form): Form<StockUpdateForm>,
) -> Result<Response> {
    let store = find_store(&state, household.id, store_id).await?;
    let nav = Nav::member(&household, &member);

    let current_stock = match form.validate() {
        Ok(current) => current,
        Err(errors) => {
            let message = errors
                .iter()
                .next()
                .map_or_else(String::new, |(_, message)| message.to_owned());
            return render_list(
                &state,
                nav,
                store,
                StatusCode::UNPROCESSABLE_ENTITY,
                Some((item_id, message)),
            )
            .await;
        }
    };

    match ItemRepository::new(state.pool())
        .update_current_stock(store.id, item_id, current_stock)
        .await
    {
        Ok(()) => {
            let item = item_id.to_string();
            add_breadcrumb("inventory", "Updated stock", Some(&[("item_id", item.as_str())]));
            Ok(Redirect::to(&format!("/stores/{}/items", store.id)).into_response())
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("item {item_id}"))),
        Err(err) => Err(err.into()),
    }
}
