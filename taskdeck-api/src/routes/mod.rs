/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Registration and the authenticated user's own record
/// - `tasks`: Task CRUD, status transitions, and the tag/status projection
/// - `comments`: Comments on owned tasks

pub mod comments;
pub mod health;
pub mod tasks;
pub mod users;
