//! # TaskDeck API Server
//!
//! This is the main API server for TaskDeck, a task tracking backend with
//! per-user task lists, comments, and tag/status reporting.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - User registration and Basic auth credential verification
//! - Task CRUD with filtered listing (tag, status, free-text search)
//! - Completion/cancellation status transitions
//! - Comments scoped to task owners
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskdeck-api
//! ```

use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use taskdeck_shared::db::migrations::run_migrations;
use taskdeck_shared::db::pool::{close_pool, create_pool, PoolConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "taskdeck_api=debug,taskdeck_shared=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        "TaskDeck API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool
    let pool = create_pool(PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    // Apply pending migrations
    run_migrations(&pool).await?;

    // Build Axum application
    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain the pool so in-flight queries finish cleanly
    close_pool(pool).await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves when the process should shut down
///
/// Listens for Ctrl+C and, on Unix, SIGTERM. A handler that cannot be
/// installed is logged and ignored rather than taking the server down.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "Ctrl+C handler could not be installed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler could not be installed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, exiting...");
}
