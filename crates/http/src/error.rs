//! Normalized failures for calls against the catalog backend.

use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every backend failure is mapped onto one of these before it reaches a
/// caller. `Display` gives the short human-readable message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("connection error: check that the server is running")]
    Unreachable {
        #[source]
        source: reqwest::Error,
    },

    #[error("the request took too long")]
    Timeout {
        #[source]
        source: reqwest::Error,
    },

    #[error("resource not found")]
    NotFound { detail: Option<String> },

    #[error("internal server error")]
    Server { status: u16, detail: Option<String> },

    #[error("request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("unexpected response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Map a transport-level failure (no HTTP status available).
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { source: err }
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Unreachable { source: err }
        }
    }

    /// Map a non-2xx response. The body's `message` is kept when present.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let detail = backend_message(body);
        match status {
            404 => Self::NotFound { detail },
            500..=599 => Self::Server { status, detail },
            _ => Self::Rejected { status, detail },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Server { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::NotFound { detail }
            | Self::Server { detail, .. }
            | Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The backend's message, or `fallback` when it sent none.
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

/// Best-effort read of `{"message": ..}` or `{"error": {"message": ..}}`.
fn backend_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error").and_then(|error| error.get("message")))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
