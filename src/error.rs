// Console client error types
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Failure outcome of a store operation, as seen by the UI action handler.
///
/// Every variant is surfaced to the immediate caller. Nothing in this crate
/// retries, swallows, or substitutes cached data for a failed mutation.
#[derive(Debug, Clone, Error)]
pub enum ConsoleError {
    // 404 Not Found
    #[error("not found: {0}")]
    NotFound(String),

    // 400 / 409 / 422 - server rejected the payload, message kept verbatim
    #[error("{message}")]
    ValidationRejected {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    // 401 Unauthorized
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    // 403 Forbidden
    #[error("forbidden: {0}")]
    Forbidden(String),

    // Network, timeout, 5xx and anything else the transport could not complete
    #[error("transport failure: {0}")]
    Transport(String),

    // Response arrived but did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl ConsoleError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ConsoleError::NotFound(message.into())
    }

    pub fn validation_rejected(
        message: impl Into<String>,
        field_errors: Option<HashMap<String, String>>,
    ) -> Self {
        ConsoleError::ValidationRejected {
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ConsoleError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ConsoleError::Forbidden(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ConsoleError::Transport(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        ConsoleError::InvalidResponse(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConsoleError::Config(message.into())
    }

    /// Map a non-success HTTP status and its (possibly empty) JSON error body.
    ///
    /// The body follows the server's error shape:
    /// `{ "error": true, "message": "...", "code": "...", "field_errors": {...} }`.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = body
            .get("message")
            .or_else(|| body.get("error").filter(|v| v.is_string()))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        let field_errors = body
            .get("field_errors")
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .map(|(k, v)| {
                        let text = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
                        (k.clone(), text)
                    })
                    .collect::<HashMap<_, _>>()
            });

        match status {
            400 | 409 | 422 => ConsoleError::validation_rejected(message, field_errors),
            401 => ConsoleError::unauthorized(message),
            403 => ConsoleError::forbidden(message),
            404 => ConsoleError::not_found(message),
            _ => ConsoleError::transport(format!("HTTP {}: {}", status, message)),
        }
    }

    /// Stable code for client handling and JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::NotFound(_) => "NOT_FOUND",
            ConsoleError::ValidationRejected { .. } => "VALIDATION_REJECTED",
            ConsoleError::Unauthorized(_) => "UNAUTHORIZED",
            ConsoleError::Forbidden(_) => "FORBIDDEN",
            ConsoleError::Transport(_) => "TRANSPORT_FAILURE",
            ConsoleError::InvalidResponse(_) => "INVALID_RESPONSE",
            ConsoleError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConsoleError::NotFound(_))
    }

    /// True when the request never produced a usable server answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ConsoleError::Transport(_) | ConsoleError::InvalidResponse(_))
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ConsoleError::invalid_response(err.to_string())
        } else {
            ConsoleError::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::invalid_response(err.to_string())
    }
}

impl From<url::ParseError> for ConsoleError {
    fn from(err: url::ParseError) -> Self {
        ConsoleError::config(format!("invalid URL: {}", err))
    }
}
