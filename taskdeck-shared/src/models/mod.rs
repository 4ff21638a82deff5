/// Database models for TaskDeck
///
/// This module contains all database models and their operations. Every
/// task and comment operation takes the owner's user id and scopes its SQL
/// to it; there is no way to reach another user's rows from here.
///
/// # Models
///
/// - `user`: Registered accounts and credential lookup
/// - `task`: Todo items with status, tags, and filtered listing
/// - `comment`: Notes attached to tasks
/// - `tag_status`: Flattened (tag, status) projection across a user's tasks
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
///     title: "Buy milk".to_string(),
///     description: String::new(),
///     tags: vec!["home".to_string()],
/// }, 1).await?;
/// # Ok(())
/// # }
/// ```
pub mod comment;
pub mod tag_status;
pub mod task;
pub mod user;
