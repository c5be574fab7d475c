//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MISSING_CALENDAR_SCOPE;

/// Main error type for the Minutes client
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MinutesError {
    /// The server rejected the session (HTTP 401). Not user-correctable; the
    /// session store tears the session down when this happens. Carries the
    /// server's `error` text (e.g. "invalid credentials") when one was sent.
    #[error("401 {0}")]
    Unauthorized(String),

    /// Non-2xx response carrying an `{ "error": ... }` body. Rendered
    /// verbatim in the UI as `"<status> <message>"`.
    #[error("{status} {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// A cached, JSON-encoded sub-document could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MinutesError {
    /// Build an [`MinutesError::Api`] from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api { status, message: message.into() }
    }

    /// Build an [`MinutesError::Unauthorized`], defaulting the message.
    pub fn unauthorized(message: Option<String>) -> Self {
        Self::Unauthorized(message.unwrap_or_else(|| "unauthorized".to_string()))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status associated with the error, if it came from a response.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for the calendar-permission 403 that needs its own prompt
    /// instead of a generic error.
    pub fn is_missing_calendar_scope(&self) -> bool {
        matches!(
            self,
            Self::Api { status: 403, message } if message == MISSING_CALENDAR_SCOPE
        )
    }
}

/// Result type alias for Minutes operations
pub type Result<T> = std::result::Result<T, MinutesError>;
