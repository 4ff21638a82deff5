/// Comment model and database operations
///
/// Comments hang off tasks and follow the same ownership rule: you can only
/// attach a comment to your own task, and only delete your own comments.
/// Both checks happen inside the SQL itself rather than as a separate
/// lookup, so there is no window where the task changes hands mid-request.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id BIGSERIAL PRIMARY KEY,
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     task_id BIGINT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::StoreError;

/// Comment model attached to a task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID
    pub id: i64,

    /// Comment body
    pub content: String,

    /// When the comment was written
    pub created_at: DateTime<Utc>,

    /// Task this comment belongs to
    pub task_id: i64,

    /// Author of the comment
    pub user_id: i64,
}

/// Input for creating a new comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// Comment body
    pub content: String,

    /// Task to attach the comment to
    pub task_id: i64,
}

impl Comment {
    /// Attaches a comment to one of the caller's tasks
    ///
    /// The insert selects from `tasks` with the ownership predicate baked
    /// in: if the task does not exist or belongs to someone else, zero rows
    /// are inserted and the call fails with [`StoreError::NotFound`].
    pub async fn create(
        pool: &PgPool,
        data: CreateComment,
        owner_id: i64,
    ) -> Result<Self, StoreError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, task_id, user_id)
            SELECT $1, $2, $3
            FROM tasks
            WHERE id = $2 AND user_id = $3
            RETURNING id, content, created_at, task_id, user_id
            "#,
        )
        .bind(data.content)
        .bind(data.task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        comment.ok_or(StoreError::NotFound)
    }

    /// Deletes a comment, returning the removed row
    ///
    /// Scoped to the comment's author, not the task's owner.
    pub async fn delete(pool: &PgPool, id: i64, owner_id: i64) -> Result<Self, StoreError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            DELETE FROM comments
            WHERE id = $1 AND user_id = $2
            RETURNING id, content, created_at, task_id, user_id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        comment.ok_or(StoreError::NotFound)
    }
}
