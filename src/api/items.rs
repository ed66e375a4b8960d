//! Item (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppResult, ErrorResponse},
    models::{CreateItem, Item, ItemIdRequest, QuantityChange},
    AppState,
};

use super::AppJson;

/// Pick the payload for a checkout/return response.
///
/// Clients historically receive the item as read before the change; the
/// `inventory.respond_with_updated` setting switches to the committed row.
fn transition_body(state: &AppState, change: QuantityChange) -> Json<Item> {
    if state.config.inventory.respond_with_updated {
        Json(change.after)
    } else {
        Json(change.before)
    }
}

/// List all items
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "All items in the catalog", body = Vec<Item>),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let items = state.services.inventory.list_items().await?;
    Ok(Json(items))
}

/// Get item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Item>> {
    let item = state.services.inventory.get_item(&id).await?;
    Ok(Json(item))
}

// The fixed checkout/return paths take precedence over `/items/:id`, so items
// with those ids are looked up here.
pub async fn get_checkout_item(State(state): State<AppState>) -> AppResult<Json<Item>> {
    let item = state.services.inventory.get_item("checkout").await?;
    Ok(Json(item))
}

pub async fn get_return_item(State(state): State<AppState>) -> AppResult<Json<Item>> {
    let item = state.services.inventory.get_item("return").await?;
    Ok(Json(item))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Item already exists", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    AppJson(item): AppJson<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let created = state.services.inventory.create_item(item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Check out one unit of an item
#[utoipa::path(
    patch,
    path = "/items/checkout",
    tag = "items",
    request_body = ItemIdRequest,
    responses(
        (status = 200, description = "Item checked out", body = Item),
        (status = 400, description = "Missing id or item not available", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn checkout_item(
    State(state): State<AppState>,
    AppJson(request): AppJson<ItemIdRequest>,
) -> AppResult<Json<Item>> {
    request.validate()?;
    let change = state.services.inventory.checkout_item(&request.id).await?;
    Ok(transition_body(&state, change))
}

/// Return one unit of an item
#[utoipa::path(
    patch,
    path = "/items/return",
    tag = "items",
    request_body = ItemIdRequest,
    responses(
        (status = 200, description = "Item returned", body = Item),
        (status = 400, description = "Missing id", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn return_item(
    State(state): State<AppState>,
    AppJson(request): AppJson<ItemIdRequest>,
) -> AppResult<Json<Item>> {
    request.validate()?;
    let change = state.services.inventory.return_item(&request.id).await?;
    Ok(transition_body(&state, change))
}
