/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and router construction
/// - Unique name generation
/// - Registration and auth header helpers
/// - Response body parsing
///
/// Tests require a running PostgreSQL database via DATABASE_URL. When it is
/// unset, `TestContext::new` returns None and tests skip themselves.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig};
use tower::Service as _;

/// Test context containing the database pool and the app under test
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context, or None to skip the calling test
    pub async fn new() -> Option<Self> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL not set, skipping integration test");
                return None;
            }
        };

        // Connect to database
        let db = PgPool::connect(&url)
            .await
            .expect("Failed to connect to test database");

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");

        // Build app
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
        };
        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(TestContext { db, app })
    }
}

static UNIQUE: AtomicU32 = AtomicU32::new(0);

/// Produces a name that will not collide across tests or runs
pub fn unique(prefix: &str) -> String {
    let n = UNIQUE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, std::process::id(), n)
}

/// Returns an Authorization header value for the given credentials
pub fn basic_auth(login: &str, password: &str) -> String {
    taskdeck_shared::auth::basic::encode_credentials(login, password)
}

/// Registered test account
pub struct TestAccount {
    pub id: i64,
    pub email: String,
    pub password: String,
}

impl TestAccount {
    /// Authorization header value for this account
    pub fn auth_header(&self) -> String {
        basic_auth(&self.email, &self.password)
    }
}

/// Registers a fresh user through the API
pub async fn register_user(ctx: &TestContext, prefix: &str) -> TestAccount {
    let name = unique(prefix);
    let email = format!("{}@example.com", name);
    let password = "test-password".to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "username": name,
                "email": email,
                "password": password,
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "registration failed");

    let body = response_json(response).await;
    let id = body["payload"]["items"]["id"]
        .as_i64()
        .expect("registration response carries the user id");

    TestAccount { id, email, password }
}

/// Deletes a user; cascades wipe their tasks and comments
pub async fn remove_user(db: &PgPool, id: i64) {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .expect("Failed to clean up test user");
}

/// Reads a response body as JSON
///
/// Middleware rejections are plain text, not JSON; those come back as Null.
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}
