use serde_json::Value;
use thiserror::Error;

/// Fallback when the server supplies no usable message field
const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response from the API, with the parsed body kept for
    /// caller inspection.
    #[error("{message}")]
    Rejected {
        message: String,
        status: u16,
        body: Value,
    },

    /// A mutating call was attempted with no token available anywhere.
    /// Raised locally, before any network I/O.
    #[error("Authentication token required")]
    AuthRequired,

    /// Transport-level failure. No meaningful status code.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build a `Rejected` error from a status code and parsed body,
    /// preferring the server-supplied `error` field, then `message`.
    pub fn rejected(status: reqwest::StatusCode, body: Value) -> Self {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| body.get("message").and_then(Value::as_str))
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string();
        ApiError::Rejected {
            message,
            status: status.as_u16(),
            body,
        }
    }

    /// Status code of an API rejection, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
