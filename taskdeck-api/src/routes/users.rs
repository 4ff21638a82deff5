/// User endpoints
///
/// This module provides user account endpoints:
/// - Registration
/// - Fetching the authenticated user's own record
///
/// # Endpoints
///
/// - `POST /api/users` - Register new user (public)
/// - `GET /api/users/me` - Get the authenticated user (Basic auth)
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use taskdeck_shared::{
    auth::{middleware::AuthContext, password},
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "Username must not be empty"))]
    pub username: String,

    /// Email address, doubles as the Basic auth login
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password, stored only as an Argon2id hash
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Register a new user
///
/// Creates a new user account. The password is hashed before it touches the
/// database; the plaintext is dropped with this request.
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "hunter2"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "meta": { "code": 200, "message": "User created", "error": false },
///   "payload": { "items": { "id": 1, "username": "alice", "email": "alice@example.com" } }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `500 Internal Server Error`: Server error, including duplicate username or email
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    // Validate request
    req.validate()?;

    // Hash password
    let password_hash = password::hash_password(&req.password)?;

    // Create user
    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(Json(ApiResponse::ok("User created", user)))
}

/// Get the authenticated user's own record
///
/// The user is resolved from the verified credentials, never from the
/// request; there is no way to address another account here.
///
/// # Endpoint
///
/// ```text
/// GET /api/users/me
/// Authorization: Basic <credentials>
/// ```
///
/// # Errors
///
/// - `404 Not Found`: The account vanished between verification and lookup
/// - `500 Internal Server Error`: Server error
pub async fn get_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok("User info", user)))
}
