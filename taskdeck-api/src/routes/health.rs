/// Health check endpoint
///
/// Provides a simple health check endpoint that verifies:
/// - The server is running
/// - Database connectivity
///
/// The response is plain JSON, not the API envelope, so probes stay trivial
/// to parse.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "version": "0.1.0",
///   "database": "up"
/// }
/// ```
use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status: "ok" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status: "up" or "down"
    pub database: String,
}

/// Health check handler
///
/// Returns service health status including database connectivity. A broken
/// database still answers 200 with `"status": "degraded"` so probes can tell
/// "service down" from "dependency down".
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    // Check database connectivity
    let database_status = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => "up",
        Err(_) => "down",
    };

    Ok(Json(HealthResponse {
        status: if database_status == "up" {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
    }))
}
