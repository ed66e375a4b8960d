//! Item (catalog entry) model and related request types.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A catalog item with its available quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    /// Caller-supplied unique identifier
    pub id: String,
    pub title: String,
    pub author: String,
    /// Units currently available for checkout
    pub quantity: i64,
}

/// Create item request.
///
/// Missing fields fall back to empty strings and a zero quantity; only the
/// identifier is mandatory.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,
    pub title: String,
    pub author: String,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,
}

impl From<CreateItem> for Item {
    fn from(req: CreateItem) -> Self {
        Self {
            id: req.id,
            title: req.title,
            author: req.author,
            quantity: req.quantity,
        }
    }
}

/// Checkout / return request body
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ItemIdRequest {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,
}

/// Outcome of a quantity transition.
///
/// `before` is the item as it stood immediately before the update and
/// `after` the row the update committed. Both come from one atomic statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityChange {
    pub before: Item,
    pub after: Item,
}

impl QuantityChange {
    /// Build a change from the committed row and the applied delta.
    pub fn from_committed(after: Item, delta: i64) -> Self {
        let before = Item {
            quantity: after.quantity - delta,
            ..after.clone()
        };
        Self { before, after }
    }
}
