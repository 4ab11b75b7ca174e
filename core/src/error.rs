//! Error types for product retrieval.
//!
//! # Design
//! Three failure kinds reach the caller: the request never produced a
//! response (`Network`), the server answered with a non-2xx status
//! (`HttpStatus`), or the body did not parse as the expected type (`Parse`).
//! The `Display` output is the human-readable message shown to users, while
//! `kind()` and `is_retryable()` keep the distinction inspectable.
//!
//! Errors are `Clone` because they live inside `FetchState`, which is
//! broadcast to observers by value.

use thiserror::Error;

/// Errors produced while retrieving and parsing a resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent, or no response arrived in time.
    #[error("{}", network_message(.message, .timed_out))]
    Network { message: String, timed_out: bool },

    /// The server returned a non-2xx status.
    #[error("request failed with status {status}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

fn network_message(message: &str, timed_out: &bool) -> String {
    if *timed_out {
        format!("request timed out: {message}")
    } else {
        format!("network error: {message}")
    }
}

/// Machine-inspectable category of a `FetchError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    HttpStatus,
    Parse,
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        FetchError::Network {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network { .. } => FetchErrorKind::Network,
            FetchError::HttpStatus { .. } => FetchErrorKind::HttpStatus,
            FetchError::Parse(_) => FetchErrorKind::Parse,
        }
    }

    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Transport failures, 408, 429 and 5xx are transient; other statuses and
    /// parse failures will repeat identically.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network { .. } => true,
            FetchError::HttpStatus { status, .. } => {
                matches!(status, 408 | 429) || (500..600).contains(status)
            }
            FetchError::Parse(_) => false,
        }
    }
}
