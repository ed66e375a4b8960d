//! Items repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::Item,
};

use super::ItemStore;

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Sqlite>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for ItemsRepository {
    async fn insert(&self, item: &Item) -> AppResult<Item> {
        let result = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (id, title, author, quantity)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, author, quantity
            "#,
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.author)
        .bind(item.quantity)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            // Lost a race against a concurrent create of the same id
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("Item with id {} already exists", item.id),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, title, author, quantity FROM items ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn find(&self, id: &str) -> AppResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, title, author, quantity FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn decrement_if_available(&self, id: &str) -> AppResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items SET quantity = quantity - 1
            WHERE id = ? AND quantity > 0
            RETURNING id, title, author, quantity
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn increment(&self, id: &str) -> AppResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items SET quantity = quantity + 1
            WHERE id = ? AND quantity < ?
            RETURNING id, title, author, quantity
            "#,
        )
        .bind(id)
        .bind(i64::MAX)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
