/// Tag and status projection
///
/// Flattens the caller's tasks into one row per (tag, status) pairing by
/// unnesting the tag arrays. A task with three tags contributes three rows,
/// all carrying the task's status display name; a task with no tags
/// contributes nothing.
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::StoreError;

/// One tag paired with the status of the task carrying it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TagStatus {
    /// Tag as stored on the task
    pub tag: String,

    /// Status display name, e.g. "New" or "Completed"
    pub status: String,
}

impl TagStatus {
    /// Lists every (tag, status) pair across the caller's tasks
    ///
    /// Pairs are not deduplicated: two tasks sharing a tag and status yield
    /// two identical rows.
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, StoreError> {
        let pairs = sqlx::query_as::<_, TagStatus>(
            r#"
            SELECT unnest(t.tags) AS tag, s.name AS status
            FROM tasks t
            INNER JOIN status s ON t.status_id = s.id
            WHERE t.user_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(pairs)
    }
}
