//! Normalized error for every remote call.
//!
//! The server answers failures with `{message}`, `{error}` or an arbitrary
//! body; transport failures carry only a library message. All of it collapses
//! into [`ApiError`] here so screens handle exactly one shape.

use serde_json::Value;
use thiserror::Error;

/// Advisory shown when the server cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection or CORS settings.";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response whose body named the problem.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// Connectivity failure; the message is always [`NETWORK_ERROR_MESSAGE`].
    #[error("{message}")]
    Network { message: String },
    /// Failure without a server-provided explanation.
    #[error("{message}")]
    Unknown { message: String },
    #[error("Response error: {message}")]
    Decode { message: String },
    #[error("Config error: {message}")]
    Config { message: String },
}

impl ApiError {
    /// The single human-readable message surfaced to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Server { message, .. }
            | Self::Network { message }
            | Self::Unknown { message }
            | Self::Decode { message }
            | Self::Config { message } => message,
        }
    }

    #[must_use]
    pub fn network() -> Self {
        Self::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    /// Resolves a non-2xx response body.
    ///
    /// Priority: `message` field, then `error` field, then the transport-level
    /// status message. The status message always exists, so per-operation
    /// fallbacks never apply here.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        if let Ok(payload) = serde_json::from_str::<Value>(body) {
            if let Some(message) = string_field(&payload, "message") {
                return Self::Server { status, message };
            }
            if let Some(message) = string_field(&payload, "error") {
                return Self::Server { status, message };
            }
        }

        Self::Unknown {
            message: format!("Request failed with status code {status}"),
        }
    }

    /// Resolves a failure that happened before any response arrived.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error, fallback: &str) -> Self {
        if err.is_connect() || err.is_request() {
            return Self::network();
        }
        if err.is_decode() {
            return Self::Decode {
                message: err.to_string(),
            };
        }
        Self::Unknown {
            message: non_empty(err.to_string()).unwrap_or_else(|| fallback.to_string()),
        }
    }
}

fn string_field(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .and_then(|value| non_empty(value.to_string()))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
