/// Response envelope for the API server
///
/// Every handler wraps its result in the same envelope so clients can parse
/// one shape for both outcomes. Successes carry a payload, failures carry
/// only the meta block.
///
/// # Success
///
/// ```json
/// {
///   "meta": { "code": 200, "message": "Task created", "error": false },
///   "payload": { "items": { "id": 1, "title": "Buy milk" } }
/// }
/// ```
///
/// # Failure
///
/// ```json
/// {
///   "meta": { "code": 404, "message": "Task not found", "error": true }
/// }
/// ```
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Envelope metadata, present on every response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    /// HTTP status code, duplicated into the body
    pub code: u16,

    /// Human-readable outcome description
    pub message: String,

    /// Whether this response describes a failure
    pub error: bool,
}

/// Envelope payload wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload<T> {
    /// The actual response data
    pub items: T,
}

/// The response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Outcome metadata
    pub meta: Meta,

    /// Response data, omitted on failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload<T>>,
}

impl<T> ApiResponse<T> {
    /// Builds a success envelope carrying `items`
    pub fn ok(message: &str, items: T) -> Self {
        Self {
            meta: Meta {
                code: StatusCode::OK.as_u16(),
                message: message.to_string(),
                error: false,
            },
            payload: Some(Payload { items }),
        }
    }
}

impl ApiResponse<()> {
    /// Builds a failure envelope with no payload
    pub fn error(status: StatusCode, message: String) -> Self {
        Self {
            meta: Meta {
                code: status.as_u16(),
                message,
                error: true,
            },
            payload: None,
        }
    }
}
