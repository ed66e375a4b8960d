use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use bookshelf_server::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository::{self, Repository},
    services::Services,
    AppState,
};

pub struct TestApp {
    pub router: Router,
    pub services: Arc<Services>,
    // Keeps a file-backed database alive for the lifetime of the app
    _dir: Option<TempDir>,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(AppConfig::default()).await
}

pub async fn spawn_app_with(mut config: AppConfig) -> TestApp {
    config.database = DatabaseConfig::in_memory();
    build_app(config, None).await
}

/// App backed by a database file with a multi-connection pool
pub async fn spawn_file_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = AppConfig {
        database: DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("books.db").display()),
            max_connections: 5,
            min_connections: 1,
        },
        ..AppConfig::default()
    };
    build_app(config, Some(dir)).await
}

async fn build_app(config: AppConfig, dir: Option<TempDir>) -> TestApp {
    let pool = repository::connect(&config.database)
        .await
        .expect("Failed to open database");
    repository::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    let services = Arc::new(Services::new(Repository::new(pool)));
    let state = AppState {
        config: Arc::new(config),
        services: services.clone(),
    };

    TestApp {
        router: api::router(state),
        services,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse response")
        };

        (status, body)
    }

    pub async fn stored_quantity(&self, id: &str) -> i64 {
        self.services
            .inventory
            .get_item(id)
            .await
            .expect("Item should exist")
            .quantity
    }
}
