/// Authentication utilities
///
/// This module provides the full Basic-auth pipeline for TaskDeck:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`basic`]: `Authorization: Basic` header encoding and decoding
/// - [`verifier`]: Resolving a login/password pair to a user id
/// - [`middleware`]: Axum middleware wiring the three together
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::basic::decode_credentials;
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Registration stores a hash, never the password
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Requests carry the pair in the Authorization header
/// let parsed = decode_credentials("Basic dXNlcjpwYXNz");
/// assert!(parsed.is_some());
/// # Ok(())
/// # }
/// ```
pub mod password;
pub mod basic;
pub mod verifier;
pub mod middleware;
