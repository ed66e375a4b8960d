//! Inventory service: item registration and quantity transitions

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreateItem, Item, QuantityChange},
    repository::ItemStore,
};

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn ItemStore>,
}

fn require_id(id: &str) -> AppResult<()> {
    if id.is_empty() {
        return Err(AppError::InvalidInput("id is required".to_string()));
    }
    Ok(())
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Item with id {} not found", id))
}

impl InventoryService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Register a new item. Fails with `Conflict` if the id is taken.
    pub async fn create_item(&self, item: CreateItem) -> AppResult<Item> {
        item.validate()?;

        if self.store.find(&item.id).await?.is_some() {
            tracing::info!("Rejected create: item id={} already exists", item.id);
            return Err(AppError::Conflict(format!(
                "Item with id {} already exists",
                item.id
            )));
        }

        let created = self.store.insert(&Item::from(item)).await?;
        tracing::info!("Created item id={} quantity={}", created.id, created.quantity);
        Ok(created)
    }

    pub async fn list_items(&self) -> AppResult<Vec<Item>> {
        self.store.list().await
    }

    pub async fn get_item(&self, id: &str) -> AppResult<Item> {
        require_id(id)?;
        tracing::debug!("Looking up item id={}", id);
        self.store.find(id).await?.ok_or_else(|| not_found(id))
    }

    /// Take one unit out of stock.
    ///
    /// The decrement is conditional on `quantity > 0` at the storage level, so
    /// concurrent checkouts can never drive the quantity negative.
    pub async fn checkout_item(&self, id: &str) -> AppResult<QuantityChange> {
        require_id(id)?;

        match self.store.decrement_if_available(id).await? {
            Some(after) => {
                tracing::info!("Checked out item id={} remaining={}", id, after.quantity);
                Ok(QuantityChange::from_committed(after, -1))
            }
            // Nothing was updated: either the item is unknown or out of stock
            None => match self.store.find(id).await? {
                Some(_) => {
                    tracing::info!("Rejected checkout: item id={} is not available", id);
                    Err(AppError::Unavailable(format!(
                        "Item with id {} is not available",
                        id
                    )))
                }
                None => {
                    tracing::warn!("Rejected checkout: item id={} not found", id);
                    Err(not_found(id))
                }
            },
        }
    }

    /// Put one unit back in stock. Returns are accepted for known items until
    /// the quantity reaches `i64::MAX`.
    pub async fn return_item(&self, id: &str) -> AppResult<QuantityChange> {
        require_id(id)?;

        match self.store.increment(id).await? {
            Some(after) => {
                tracing::info!("Returned item id={} available={}", id, after.quantity);
                Ok(QuantityChange::from_committed(after, 1))
            }
            None => match self.store.find(id).await? {
                Some(_) => {
                    tracing::warn!("Rejected return: item id={} is at maximum quantity", id);
                    Err(AppError::InvalidInput(format!(
                        "Item with id {} cannot hold more units",
                        id
                    )))
                }
                None => {
                    tracing::warn!("Rejected return: item id={} not found", id);
                    Err(not_found(id))
                }
            },
        }
    }

    /// Check that storage answers
    pub async fn check_storage(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
