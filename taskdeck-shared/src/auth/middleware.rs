/// Authentication middleware for Axum
///
/// This module provides the HTTP Basic authentication middleware guarding
/// every task, comment, and profile route. The middleware decodes the
/// `Authorization` header, verifies the pair against the database, and adds
/// the authenticated identity to request extensions. Handlers never see a
/// request that did not pass the check.
///
/// # Request Extensions
///
/// After successful authentication, the middleware adds:
/// - `AuthContext`: the authenticated user's id
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use taskdeck_shared::auth::middleware::{create_basic_auth_middleware, AuthContext};
/// use sqlx::PgPool;
///
/// async fn protected_handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
///
/// async fn setup(pool: PgPool) -> Router {
///     Router::new()
///         .route("/api/tasks", get(protected_handler))
///         .layer(middleware::from_fn(create_basic_auth_middleware(pool)))
/// }
/// ```
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;

use super::{basic, verifier};

/// Authentication context added to request extensions
///
/// Handlers extract it with Axum's `Extension` extractor and use the id to
/// scope every store call.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskdeck_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: i64,
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not well-formed Basic credentials
    InvalidFormat(String),

    /// Credentials did not match any account
    InvalidCredentials,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response()
            }
        }
    }
}

/// HTTP Basic authentication middleware
///
/// Decodes credentials from the `Authorization: Basic <base64>` header and
/// verifies them against the users table on every request; there are no
/// sessions or tokens to cache or expire.
///
/// # Errors
///
/// - 400 Bad Request if the header is missing or not valid Basic credentials
/// - 401 Unauthorized if the pair does not belong to any account
pub async fn basic_auth_middleware(
    pool: PgPool,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    // Parse Basic credentials
    let (login, password) = basic::decode_credentials(auth_header)
        .ok_or_else(|| AuthError::InvalidFormat("Expected Basic credentials".to_string()))?;

    // Verify against stored accounts
    let user_id = verifier::verify_credentials(&pool, &login, &password)
        .await
        .ok_or(AuthError::InvalidCredentials)?;

    // Add auth context to request extensions
    req.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(req).await)
}

/// Creates a Basic authentication middleware closure
///
/// Helper function that captures the database pool and returns a middleware
/// function suitable for `axum::middleware::from_fn`.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use taskdeck_shared::auth::middleware::create_basic_auth_middleware;
/// use sqlx::PgPool;
///
/// async fn setup(pool: PgPool) -> Router {
///     Router::new()
///         .route("/api/tasks", get(|| async { "OK" }))
///         .layer(middleware::from_fn(create_basic_auth_middleware(pool)))
/// }
/// ```
pub fn create_basic_auth_middleware(
    pool: PgPool,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>> + Clone {
    move |req, next| {
        let pool = pool.clone();
        Box::pin(basic_auth_middleware(pool, req, next))
    }
}
