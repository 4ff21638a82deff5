/// Task model and database operations
///
/// This module provides the Task model representing a single todo item owned
/// by exactly one user. Every operation here is scoped to the owner: a task id
/// from another account behaves as if the row does not exist.
///
/// # Status vocabulary
///
/// Statuses live in a lookup table seeded by the migrations. Tasks start as
/// `New`; marking a task completed or canceled overwrites the status
/// unconditionally, so the last write wins regardless of the current value.
///
/// ```text
/// new → completed
/// new → canceled
/// completed ↔ canceled
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TABLE status (
///     id INT PRIMARY KEY,
///     name TEXT NOT NULL UNIQUE,
///     code_name TEXT NOT NULL UNIQUE
/// );
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     tags TEXT[] NOT NULL DEFAULT '{}',
///     status_id INT NOT NULL REFERENCES status(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{Task, CreateTask};
/// use taskdeck_shared::db::pool::{create_pool, PoolConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(PoolConfig {
///     url: "postgresql://localhost/taskdeck".to_string(),
///     ..Default::default()
/// }).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Buy groceries".to_string(),
///     description: "Milk, eggs, bread".to_string(),
///     tags: vec!["home".to_string()],
/// }, 1).await?;
///
/// // Close it out
/// Task::mark_completed(&pool, task.id, 1).await?;
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::StoreError;

/// Task status, backed by the seeded `status` lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum TaskStatus {
    /// Task was finished
    Completed = 1,

    /// Task was abandoned
    Cancel = 2,

    /// Reserved by the vocabulary, never assigned by any operation
    InProgress = 3,

    /// Freshly created task, the only starting status
    New = 4,
}

impl TaskStatus {
    /// Display name, as stored in `status.name`
    pub fn name(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancel => "Cancel",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::New => "New",
        }
    }

    /// Machine name, as stored in `status.code_name`
    pub fn code_name(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "completed",
            TaskStatus::Cancel => "cancel",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::New => "new",
        }
    }
}

/// Task model representing a single todo item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Short summary, never empty
    pub title: String,

    /// Free-form body, searched by the `search` filter
    pub description: String,

    /// Labels for grouping, matched case-insensitively on input
    pub tags: Vec<String>,

    /// Current status
    #[sqlx(rename = "status_id")]
    #[serde(rename = "status")]
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,

    /// Owner of the task
    pub user_id: i64,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title, must not be empty
    pub title: String,

    /// Task description
    pub description: String,

    /// Initial tags
    pub tags: Vec<String>,
}

/// Input for updating a task
///
/// Only description, tags, and the update timestamp are written. Title and
/// status are untouched by updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Task to update
    pub id: i64,

    /// Replacement description
    pub description: String,

    /// Replacement tags
    pub tags: Vec<String>,

    /// New update timestamp, stamped by the caller
    pub updated_at: DateTime<Utc>,
}

/// Listing filter, deserialized straight from the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    /// Match tasks carrying this tag (lowercased before matching)
    pub tag: Option<String>,

    /// Match tasks in this status (title-cased before matching)
    pub status: Option<String>,

    /// Match tasks whose description contains this text
    pub search: Option<String>,
}

/// Which of the three listing branches a filter selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Tag and/or status present, combined with OR
    TagOrStatus,

    /// Free-text search over descriptions
    Search,

    /// No filter, every task owned by the caller
    Unfiltered,
}

impl TaskFilter {
    /// Resolves the branch this filter selects
    ///
    /// Tag or status take precedence over search; empty strings count as
    /// absent, so `?tag=&search=milk` still lands in the search branch.
    pub fn mode(&self) -> FilterMode {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());

        if present(&self.tag) || present(&self.status) {
            FilterMode::TagOrStatus
        } else if present(&self.search) {
            FilterMode::Search
        } else {
            FilterMode::Unfiltered
        }
    }
}

/// Title-cases a status filter value so it matches `status.name`
///
/// Uppercases every letter that follows a non-letter, leaving the rest
/// alone: "completed" becomes "Completed", "inProgress" becomes
/// "InProgress".
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for c in input.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphabetic();
    }

    out
}

impl Task {
    /// Creates a new task owned by `owner_id`
    ///
    /// The task always starts in `New` status with both timestamps set to
    /// now, regardless of what the caller might have wanted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the title is empty, or
    /// [`StoreError::Database`] if the insert fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use taskdeck_shared::models::task::{Task, CreateTask};
    /// # use taskdeck_shared::error::StoreError;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), StoreError> {
    /// let task = Task::create(&pool, CreateTask {
    ///     title: "Water the plants".to_string(),
    ///     description: String::new(),
    ///     tags: vec![],
    /// }, 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateTask, owner_id: i64) -> Result<Self, StoreError> {
        if data.title.is_empty() {
            return Err(StoreError::Validation("title must not be empty".to_string()));
        }

        let now = Utc::now();
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, tags, status_id, created_at, updated_at, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, tags, status_id, created_at, updated_at, user_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.tags)
        .bind(TaskStatus::New)
        .bind(now)
        .bind(now)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, scoped to its owner
    pub async fn find_by_id(pool: &PgPool, id: i64, owner_id: i64) -> Result<Self, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, tags, status_id, created_at, updated_at, user_id
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        task.ok_or(StoreError::NotFound)
    }

    /// Lists the caller's tasks, applying at most one filter branch
    ///
    /// Tag and status filters are combined with OR in a single branch and
    /// win over free-text search. Filter values are normalized the way the
    /// stored vocabulary expects: status input is title-cased, tag input is
    /// lowercased. A filter value that matches nothing yields an empty list,
    /// not an error.
    pub async fn list(
        pool: &PgPool,
        owner_id: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Self>, StoreError> {
        let tasks = match filter.mode() {
            FilterMode::TagOrStatus => {
                let status = title_case(filter.status.as_deref().unwrap_or(""));
                let tag = filter.tag.as_deref().unwrap_or("").to_lowercase();

                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT t.id, t.title, t.description, t.tags, t.status_id,
                           t.created_at, t.updated_at, t.user_id
                    FROM tasks t
                    INNER JOIN status s ON t.status_id = s.id
                    WHERE t.user_id = $1 AND (s.name = $2 OR $3 = ANY(t.tags))
                    "#,
                )
                .bind(owner_id)
                .bind(status)
                .bind(tag)
                .fetch_all(pool)
                .await?
            }
            FilterMode::Search => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, title, description, tags, status_id, created_at, updated_at, user_id
                    FROM tasks
                    WHERE user_id = $1 AND description LIKE '%' || $2 || '%'
                    "#,
                )
                .bind(owner_id)
                .bind(filter.search.as_deref().unwrap_or(""))
                .fetch_all(pool)
                .await?
            }
            FilterMode::Unfiltered => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, title, description, tags, status_id, created_at, updated_at, user_id
                    FROM tasks
                    WHERE user_id = $1
                    "#,
                )
                .bind(owner_id)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(tasks)
    }

    /// Replaces a task's description and tags
    ///
    /// Writes exactly the three fields carried by [`UpdateTask`]; the caller
    /// stamps `updated_at` before invoking.
    pub async fn update(pool: &PgPool, data: UpdateTask, owner_id: i64) -> Result<Self, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET description = $1, tags = $2, updated_at = $3
            WHERE id = $4 AND user_id = $5
            RETURNING id, title, description, tags, status_id, created_at, updated_at, user_id
            "#,
        )
        .bind(data.description)
        .bind(data.tags)
        .bind(data.updated_at)
        .bind(data.id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        task.ok_or(StoreError::NotFound)
    }

    /// Deletes a task, returning the removed row
    ///
    /// Comments on the task go with it via CASCADE.
    pub async fn delete(pool: &PgPool, id: i64, owner_id: i64) -> Result<Self, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, tags, status_id, created_at, updated_at, user_id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

        task.ok_or(StoreError::NotFound)
    }

    /// Marks a task completed
    ///
    /// Unconditional overwrite: succeeds from any current status.
    pub async fn mark_completed(pool: &PgPool, id: i64, owner_id: i64) -> Result<Self, StoreError> {
        Self::set_status(pool, id, owner_id, TaskStatus::Completed).await
    }

    /// Marks a task canceled
    ///
    /// Unconditional overwrite: succeeds from any current status.
    pub async fn mark_canceled(pool: &PgPool, id: i64, owner_id: i64) -> Result<Self, StoreError> {
        Self::set_status(pool, id, owner_id, TaskStatus::Cancel).await
    }

    // Status transitions write only status_id; updated_at moves only through
    // update().
    async fn set_status(
        pool: &PgPool,
        id: i64,
        owner_id: i64,
        status: TaskStatus,
    ) -> Result<Self, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status_id = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, tags, status_id, created_at, updated_at, user_id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        task.ok_or(StoreError::NotFound)
    }
}
