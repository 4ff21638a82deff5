/// Store error type shared by all model operations
///
/// Every database-backed operation returns exactly one `Result` carrying
/// this error. Callers decide how to surface it; the stores never swallow a
/// failure and keep going.
use thiserror::Error;

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the id and owner predicate
    ///
    /// Also covers rows that exist but belong to another user, so callers
    /// cannot distinguish the two cases.
    #[error("record not found")]
    NotFound,

    /// Input rejected before touching the database
    #[error("invalid input: {0}")]
    Validation(String),

    /// The store reached the database but got an impossible answer
    #[error("internal store error: {0}")]
    Internal(String),

    /// The database itself failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
