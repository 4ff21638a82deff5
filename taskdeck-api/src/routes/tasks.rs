/// Task endpoints
///
/// This module provides the task CRUD and lifecycle endpoints. Every route
/// here sits behind Basic auth; the owner id comes from the verified
/// credentials and scopes each store call.
///
/// # Endpoints
///
/// - `POST /api/tasks` - Create task
/// - `GET /api/tasks` - List tasks (query params `tag`, `status`, `search`)
/// - `GET /api/tasks/:id` - Get single task
/// - `PUT /api/tasks` - Update description and tags (id in payload)
/// - `DELETE /api/tasks/:id` - Delete task
/// - `PUT /api/tasks/complete/:id` - Mark task completed
/// - `PUT /api/tasks/cancel/:id` - Mark task canceled
/// - `GET /api/tagstatus` - Tag/status projection over the owner's tasks
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use taskdeck_shared::{
    auth::middleware::AuthContext,
    models::{
        tag_status::TagStatus,
        task::{CreateTask, Task, TaskFilter, UpdateTask},
    },
};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Task description, empty when omitted
    #[serde(default)]
    pub description: String,

    /// Initial tags, empty when omitted
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Update task request
///
/// Carries its own task id; only description and tags are written.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// Task to update
    pub id: i64,

    /// Replacement description
    #[serde(default)]
    pub description: String,

    /// Replacement tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Create a new task
///
/// The task always starts in `new` status; the client cannot pick a status
/// or timestamps.
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks
/// Authorization: Basic <credentials>
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "description": "Two liters",
///   "tags": ["home"]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "meta": { "code": 200, "message": "Task created", "error": false },
///   "payload": { "items": { "id": 1, "title": "Buy milk", "status": "new" } }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    // Validate request
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            tags: req.tags,
        },
        auth.user_id,
    )
    .await?;

    tracing::info!(task_id = task.id, user_id = auth.user_id, "Task created");

    Ok(Json(ApiResponse::ok("Task created", task)))
}

/// List the caller's tasks
///
/// At most one filter branch applies: `tag`/`status` (combined with OR) win
/// over `search`, and no parameters returns everything the caller owns.
/// Unknown query parameters are ignored.
///
/// # Endpoint
///
/// ```text
/// GET /api/tasks?tag=home&status=completed
/// GET /api/tasks?search=milk
/// Authorization: Basic <credentials>
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: Server error
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<ApiResponse<Vec<Task>>>> {
    let tasks = Task::list(&state.db, auth.user_id, &filter).await?;

    Ok(Json(ApiResponse::ok("Tasks retrieved", tasks)))
}

/// Get a single task by id
///
/// # Errors
///
/// - `404 Not Found`: No such task, or it belongs to someone else
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = Task::find_by_id(&state.db, id, auth.user_id)
        .await
        .map_err(|e| ApiError::from_store(e, "Task"))?;

    Ok(Json(ApiResponse::ok("Task retrieved", task)))
}

/// Update a task's description and tags
///
/// Title and status are untouched; `updated_at` is stamped here.
///
/// # Endpoint
///
/// ```text
/// PUT /api/tasks
/// Authorization: Basic <credentials>
/// Content-Type: application/json
///
/// {
///   "id": 1,
///   "description": "Three liters",
///   "tags": ["home", "urgent"]
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such task, or it belongs to someone else
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = Task::update(
        &state.db,
        UpdateTask {
            id: req.id,
            description: req.description,
            tags: req.tags,
            updated_at: Utc::now(),
        },
        auth.user_id,
    )
    .await
    .map_err(|e| ApiError::from_store(e, "Task"))?;

    Ok(Json(ApiResponse::ok("Task updated", task)))
}

/// Delete a task
///
/// Comments on the task are removed with it.
///
/// # Errors
///
/// - `404 Not Found`: No such task, or it belongs to someone else
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = Task::delete(&state.db, id, auth.user_id)
        .await
        .map_err(|e| ApiError::from_store(e, "Task"))?;

    tracing::info!(task_id = task.id, user_id = auth.user_id, "Task deleted");

    Ok(Json(ApiResponse::ok("Task deleted", task)))
}

/// Mark a task completed
///
/// Overwrites the current status regardless of what it was.
///
/// # Errors
///
/// - `404 Not Found`: No such task, or it belongs to someone else
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = Task::mark_completed(&state.db, id, auth.user_id)
        .await
        .map_err(|e| ApiError::from_store(e, "Task"))?;

    Ok(Json(ApiResponse::ok("Task completed", task)))
}

/// Mark a task canceled
///
/// Overwrites the current status regardless of what it was.
///
/// # Errors
///
/// - `404 Not Found`: No such task, or it belongs to someone else
pub async fn cancel_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = Task::mark_canceled(&state.db, id, auth.user_id)
        .await
        .map_err(|e| ApiError::from_store(e, "Task"))?;

    Ok(Json(ApiResponse::ok("Task canceled", task)))
}

/// Tag/status projection over the caller's tasks
///
/// Returns one `{tag, status}` pair per tag per task; untagged tasks
/// contribute nothing.
///
/// # Endpoint
///
/// ```text
/// GET /api/tagstatus
/// Authorization: Basic <credentials>
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: Server error
pub async fn status_and_tags(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ApiResponse<Vec<TagStatus>>>> {
    let pairs = TagStatus::list_by_owner(&state.db, auth.user_id).await?;

    Ok(Json(ApiResponse::ok("Tags and statuses retrieved", pairs)))
}
