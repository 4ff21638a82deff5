/// User model and database operations
///
/// This module provides the User model for registration and credential
/// lookup. The stored hash never leaves the process: `password_hash` is
/// excluded from serialization, so handlers can return a `User` directly.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::{User, CreateUser};
/// use taskdeck_shared::auth::password::hash_password;
/// use taskdeck_shared::db::pool::{create_pool, PoolConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(PoolConfig {
///     url: "postgresql://localhost/taskdeck".to_string(),
///     ..Default::default()
/// }).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "jdoe".to_string(),
///     email: "jdoe@example.com".to_string(),
///     password_hash: hash_password("secret")?,
/// }).await?;
///
/// // Login lookup goes through the email
/// let found = User::find_by_email(&pool, "jdoe@example.com").await?;
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::StoreError;

/// User model representing a registered account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Display name, unique across all users
    pub username: String,

    /// Login identifier, unique across all users
    pub email: String,

    /// Argon2id password hash
    ///
    /// Never serialized; responses carrying a `User` omit this field.
    #[serde(skip)]
    pub password_hash: String,
}

/// Input for creating a new user
///
/// The caller hashes the password first; this store never sees plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub username: String,

    /// Login identifier
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] when the insert returns no row,
    /// which is what a username or email collision looks like here, or
    /// [`StoreError::Database`] if the insert itself fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use taskdeck_shared::models::user::{User, CreateUser};
    /// # use taskdeck_shared::error::StoreError;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), StoreError> {
    /// let user = User::create(&pool, CreateUser {
    ///     username: "jdoe".to_string(),
    ///     email: "jdoe@example.com".to_string(),
    ///     password_hash: "$argon2id$...".to_string(),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            RETURNING id, username, email, password_hash
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_optional(pool)
        .await?;

        user.ok_or_else(|| StoreError::Internal("user insert returned no row".to_string()))
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// The lookup is exact; emails are stored as given at registration.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
