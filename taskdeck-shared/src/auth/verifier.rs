/// Credential verification against stored accounts
///
/// Takes a decoded login/password pair and answers one question: which
/// user is this? Every failure collapses to `None` so the caller cannot
/// tell an unknown login from a wrong password, and neither can the
/// response. The distinctions survive only in the logs, and even there the
/// submitted credentials themselves are never recorded.
use sqlx::PgPool;

use crate::models::user::User;

use super::password;

/// Resolves a login/password pair to a user id
///
/// Returns `Some(user_id)` only when the login exists and the password
/// matches its stored hash. Lookup failures, unknown logins, mismatches,
/// and unreadable stored hashes all come back as `None`.
pub async fn verify_credentials(pool: &PgPool, login: &str, password: &str) -> Option<i64> {
    let user = match User::find_by_email(pool, login).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!("Credential check for unknown login");
            return None;
        }
        Err(err) => {
            tracing::error!(error = %err, "Credential lookup failed");
            return None;
        }
    };

    match password::verify_password(password, &user.password_hash) {
        Ok(true) => Some(user.id),
        Ok(false) => {
            tracing::debug!(user_id = user.id, "Password mismatch");
            None
        }
        Err(err) => {
            tracing::error!(user_id = user.id, error = %err, "Stored password hash is unusable");
            None
        }
    }
}
