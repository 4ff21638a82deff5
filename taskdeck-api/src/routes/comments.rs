/// Comment endpoints
///
/// Comments attach to tasks the caller owns. Adding a comment to someone
/// else's task fails the same way as commenting on a task that does not
/// exist.
///
/// # Endpoints
///
/// - `POST /api/comments` - Add comment to an owned task
/// - `DELETE /api/comments/:id` - Delete own comment
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use taskdeck_shared::{
    auth::middleware::AuthContext,
    models::comment::{Comment, CreateComment},
};
use validator::Validate;

/// Add comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment body
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    /// Task the comment attaches to
    pub task_id: i64,
}

/// Add a comment to an owned task
///
/// # Endpoint
///
/// ```text
/// POST /api/comments
/// Authorization: Basic <credentials>
/// Content-Type: application/json
///
/// {
///   "content": "Done by Friday?",
///   "task_id": 1
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `404 Not Found`: The task does not exist or belongs to someone else
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<Json<ApiResponse<Comment>>> {
    // Validate request
    req.validate()?;

    // The not-found case is about the parent task, not the comment
    let comment = Comment::create(
        &state.db,
        CreateComment {
            content: req.content,
            task_id: req.task_id,
        },
        auth.user_id,
    )
    .await
    .map_err(|e| ApiError::from_store(e, "Task"))?;

    Ok(Json(ApiResponse::ok("Comment added", comment)))
}

/// Delete one of the caller's own comments
///
/// # Errors
///
/// - `404 Not Found`: No such comment, or it was written by someone else
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Comment>>> {
    let comment = Comment::delete(&state.db, id, auth.user_id)
        .await
        .map_err(|e| ApiError::from_store(e, "Comment"))?;

    Ok(Json(ApiResponse::ok("Comment deleted", comment)))
}
