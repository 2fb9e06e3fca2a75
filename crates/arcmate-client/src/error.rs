//! Error types for the Arcmate client.

use crate::extract::string_field;
use serde_json::Value;
use thiserror::Error;

/// Fallback text when a backend error payload carries no usable message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Unexpected API error";

/// Errors surfaced by the client call surface.
///
/// None of these are fatal to the process; every operation reports its own
/// outcome. An empty search result is not an error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed or incomplete request payload. No state was changed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Login response did not carry a usable token.
    #[error("LoginId missing from response")]
    TokenMissing,

    /// The operation requires an active session.
    #[error("no active session")]
    NotLoggedIn,

    /// Simulated transport failure, reduced to a human-readable message.
    #[error("{message}")]
    Backend { message: String },

    /// The response body did not match the operation's contract.
    #[error("unexpected response shape for {0}")]
    UnexpectedResponse(&'static str),
}

impl ClientError {
    /// Build a transport failure from a backend error payload.
    pub fn backend(payload: &Value) -> Self {
        ClientError::Backend {
            message: backend_message(payload),
        }
    }
}

/// Reduce a backend error payload to a human-readable message.
///
/// Falls through the fixed chain `Message` -> `message` -> default text, so
/// callers always receive something printable.
pub fn backend_message(payload: &Value) -> String {
    string_field(payload, &["Message", "message"])
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}
