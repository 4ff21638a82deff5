/// HTTP Basic credential codec
///
/// This module parses and builds `Authorization: Basic` header values. It
/// only handles the transport encoding; checking the credentials against
/// the database lives in the `verifier` module.
///
/// # Header Format
///
/// `Basic base64(login:password)`, with the scheme matched
/// case-insensitively. The login is everything before the first colon, so
/// passwords may themselves contain colons.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::basic::{decode_credentials, encode_credentials};
///
/// let header = encode_credentials("jdoe@example.com", "hunter:2");
/// let (login, password) = decode_credentials(&header).unwrap();
/// assert_eq!(login, "jdoe@example.com");
/// assert_eq!(password, "hunter:2");
/// ```
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Authorization scheme prefix, including the separating space
const SCHEME_PREFIX: &str = "Basic ";

/// Builds an `Authorization` header value from a login and password
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::basic::encode_credentials;
///
/// let header = encode_credentials("jdoe@example.com", "secret");
/// assert!(header.starts_with("Basic "));
/// ```
pub fn encode_credentials(login: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", login, password));
    format!("{}{}", SCHEME_PREFIX, encoded)
}

/// Extracts the login and password from an `Authorization` header value
///
/// Returns `None` when the value is not Basic credentials: wrong scheme,
/// broken base64, non-UTF-8 bytes, or a payload without a colon. An empty
/// password is fine; whether the pair is *correct* is not decided here.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::basic::decode_credentials;
///
/// // "user:pass" in base64
/// let parsed = decode_credentials("Basic dXNlcjpwYXNz").unwrap();
/// assert_eq!(parsed, ("user".to_string(), "pass".to_string()));
///
/// assert!(decode_credentials("Bearer dXNlcjpwYXNz").is_none());
/// ```
pub fn decode_credentials(header_value: &str) -> Option<(String, String)> {
    let encoded = strip_scheme(header_value)?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let (login, password) = decoded.split_once(':')?;
    Some((login.to_string(), password.to_string()))
}

/// Strips the case-insensitive "Basic " prefix, if present
fn strip_scheme(header_value: &str) -> Option<&str> {
    let scheme = header_value.get(..SCHEME_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(SCHEME_PREFIX) {
        return None;
    }

    Some(&header_value[SCHEME_PREFIX.len()..])
}
