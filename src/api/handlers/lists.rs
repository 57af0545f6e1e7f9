use super::{outcome_status, parse_body};
use crate::anylist::{ItemUpdates, ListItem};
use crate::api::errors::{api_error, ApiError};
use crate::api::AppState;
use crate::constants::{
    CHECKED_REQUIRED, ITEM_ID_REQUIRED, ITEM_NAME_OR_ID_REQUIRED, ITEM_NAME_REQUIRED,
    LIST_NAME_REQUIRED,
};
use crate::service::{self, ItemSelector};
use crate::validation::present;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub list: Option<String>,
}

/// Body shared by the item endpoints; each uses the fields it needs.
///
/// `"notes": null` clears the notes while an absent `notes` leaves them
/// alone. A `null` name is treated as absent since items always keep one.
#[derive(Debug, Default, Deserialize)]
pub struct ItemRequest {
    pub list: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub checked: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct ListsResponse {
    pub lists: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub checked: bool,
    pub notes: String,
}

impl From<ListItem> for ItemResponse {
    fn from(item: ListItem) -> Self {
        ItemResponse {
            id: item.identifier,
            name: item.name,
            checked: item.checked,
            notes: item.details.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemResponse>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Picks the requested list, falling back to the configured default.
fn resolve_list(state: &AppState, requested: Option<String>) -> Result<String, ApiError> {
    non_empty(requested)
        .or_else(|| non_empty(state.default_list.clone()))
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, LIST_NAME_REQUIRED))
}

/// Returns the names of all shopping lists
#[axum::debug_handler]
pub async fn get_lists(
    Extension(state): Extension<AppState>,
) -> Result<Json<ListsResponse>, ApiError> {
    let lists = service::list_names(state.client.as_ref()).await?;
    Ok(Json(ListsResponse { lists }))
}

/// Returns the items of a list
#[axum::debug_handler]
pub async fn get_items(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let list = resolve_list(&state, query.list)?;
    let items = service::list_items(state.client.as_ref(), &list).await?;
    Ok(Json(ItemsResponse {
        items: items.into_iter().map(ItemResponse::from).collect(),
    }))
}

/// Adds an item, or unchecks it if it was checked off. 304 when already active.
#[axum::debug_handler]
pub async fn add_item(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let request = parse_body(payload)?;
    let name = non_empty(request.name)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, ITEM_NAME_REQUIRED))?;
    let list = resolve_list(&state, request.list)?;

    let updates = ItemUpdates {
        notes: request.notes,
        ..Default::default()
    };
    let outcome = service::add_item(state.client.as_ref(), &list, &name, &updates).await?;
    Ok(outcome_status(outcome))
}

/// Removes an item by name or id. 304 when it is not on the list.
#[axum::debug_handler]
pub async fn remove_item(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let request = parse_body(payload)?;
    let list = resolve_list(&state, request.list)?;

    let selector = match (non_empty(request.name), non_empty(request.id)) {
        (Some(name), _) => ItemSelector::Name(name),
        (None, Some(id)) => ItemSelector::Id(id),
        (None, None) => {
            return Err(api_error(StatusCode::BAD_REQUEST, ITEM_NAME_OR_ID_REQUIRED));
        }
    };

    let outcome = service::remove_item(state.client.as_ref(), &list, &selector).await?;
    Ok(outcome_status(outcome))
}

/// Updates the name, checked state or notes of an item identified by id
#[axum::debug_handler]
pub async fn update_item(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let request = parse_body(payload)?;
    let list = resolve_list(&state, request.list)?;
    let id = non_empty(request.id)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, ITEM_ID_REQUIRED))?;

    let updates = ItemUpdates {
        name: request.name,
        checked: request.checked,
        notes: request.notes,
    };
    let outcome = service::update_item(state.client.as_ref(), &list, &id, &updates).await?;
    Ok(outcome_status(outcome))
}

/// Sets the checked state of an item identified by name. 304 when unchanged.
#[axum::debug_handler]
pub async fn check_item(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let request = parse_body(payload)?;
    let list = resolve_list(&state, request.list)?;
    let name = non_empty(request.name)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, ITEM_NAME_REQUIRED))?;
    let checked = request
        .checked
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, CHECKED_REQUIRED))?;

    let outcome = service::check_item(state.client.as_ref(), &list, &name, checked).await?;
    Ok(outcome_status(outcome))
}
