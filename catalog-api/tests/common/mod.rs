/// Common test utilities for integration tests
///
/// Builds the full router over an in-memory product store, mints bearer
/// tokens for arbitrary user ids and sends JSON requests in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use catalog_api::app::{build_router, AppState};
use catalog_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use catalog_shared::auth::jwt::{create_token, Claims};
use catalog_shared::models::product::{InMemoryProductStore, ProductStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing the router and its store
pub struct TestContext {
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context backed by a fresh in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryProductStore::new()))
    }

    /// Creates a context backed by the given store
    pub fn with_store(store: Arc<dyn ProductStore>) -> Self {
        let state = AppState::new(store, test_config());
        Self {
            app: build_router(state),
        }
    }

    /// Returns an authorization header value for `user_id`
    pub fn auth_header(&self, user_id: i64) -> String {
        let token = create_token(&Claims::new(user_id), SECRET).unwrap();
        format!("Bearer {}", token)
    }

    /// Sends a request as `user_id` and returns status plus parsed JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        user_id: i64,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", self.auth_header(user_id))
            .header("content-type", "application/json")
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        self.call(request).await
    }

    /// Sends a prepared request and returns status plus parsed JSON body
    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!(
                    "Expected JSON body, got {}: {}",
                    status,
                    String::from_utf8_lossy(&bytes)
                )
            })
        };

        (status, json)
    }
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            run_migrations: false,
        },
        jwt: JwtConfig {
            secret: SECRET.to_string(),
        },
    }
}
