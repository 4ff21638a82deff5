/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::auth::middleware::create_basic_auth_middleware;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                       # Health check (public)
/// └── /api/
///     ├── POST   /users             # Registration (public)
///     ├── GET    /users/me          # Own record (Basic auth)
///     ├── POST   /tasks             # Create task
///     ├── GET    /tasks             # List tasks (?tag=&status=&search=)
///     ├── PUT    /tasks             # Update task (id in payload)
///     ├── GET    /tasks/:id         # Get task
///     ├── DELETE /tasks/:id         # Delete task
///     ├── PUT    /tasks/complete/:id
///     ├── PUT    /tasks/cancel/:id
///     ├── POST   /comments          # Add comment
///     ├── DELETE /comments/:id      # Delete comment
///     └── GET    /tagstatus         # Tag/status projection
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Security headers
/// 3. Basic auth (protected routes only)
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::app::{AppState, build_router};
/// use taskdeck_api::config::Config;
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
///
/// let app = build_router(state);
///
/// // Start server
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn build_router(state: AppState) -> Router {
    // Import route handlers
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Registration (public, no auth)
    let public_routes = Router::new().route("/users", post(routes::users::create_user));

    // Everything else requires Basic credentials on every request
    let protected_routes = Router::new()
        .route("/users/me", get(routes::users::get_user))
        .route(
            "/tasks",
            post(routes::tasks::create_task)
                .get(routes::tasks::list_tasks)
                .put(routes::tasks::update_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task).delete(routes::tasks::delete_task),
        )
        .route("/tasks/complete/:id", put(routes::tasks::complete_task))
        .route("/tasks/cancel/:id", put(routes::tasks::cancel_task))
        .route("/comments", post(routes::comments::add_comment))
        .route("/comments/:id", delete(routes::comments::delete_comment))
        .route("/tagstatus", get(routes::tasks::status_and_tags))
        .layer(axum::middleware::from_fn(create_basic_auth_middleware(
            state.db.clone(),
        )));

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new())
        .with_state(state)
}
