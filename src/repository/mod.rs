//! Repository layer for database operations

pub mod items;

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::Item,
};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a connection pool for the configured database.
///
/// In-memory databases live only as long as their connection, so the pool is
/// pinned to a single connection that is never recycled.
pub async fn connect(config: &DatabaseConfig) -> Result<Pool<Sqlite>, sqlx::Error> {
    let mut options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool_options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        // Readers do not block the single writer
        options = options.journal_mode(SqliteJournalMode::Wal);
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
    };

    pool_options.connect_with(options).await
}

/// Apply pending schema migrations
pub async fn migrate(pool: &Pool<Sqlite>) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Storage interface consumed by the inventory service.
///
/// Quantity changes are single conditional statements: they either apply and
/// return the committed row, or touch nothing and return `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert a new item. A duplicate id yields `AppError::Conflict`.
    async fn insert(&self, item: &Item) -> AppResult<Item>;

    /// All items in insertion order
    async fn list(&self) -> AppResult<Vec<Item>>;

    async fn find(&self, id: &str) -> AppResult<Option<Item>>;

    /// Decrement quantity by one if it is positive
    async fn decrement_if_available(&self, id: &str) -> AppResult<Option<Item>>;

    /// Increment quantity by one unless it is already at `i64::MAX`
    async fn increment(&self, id: &str) -> AppResult<Option<Item>>;

    /// Round-trip to storage without touching data
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub items: items::ItemsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            items: items::ItemsRepository::new(pool),
        }
    }
}
