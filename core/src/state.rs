//! Lifecycle state of a single retrieval.

use crate::error::FetchError;

/// Coarse lifecycle status, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// The observable state of a retrieval.
///
/// Data is only present once `Succeeded` and an error only once `Failed`;
/// neither exists while `Idle` or `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Succeeded(T),
    Failed(FetchError),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn status(&self) -> FetchStatus {
        match self {
            FetchState::Idle => FetchStatus::Idle,
            FetchState::Loading => FetchStatus::Loading,
            FetchState::Succeeded(_) => FetchStatus::Succeeded,
            FetchState::Failed(_) => FetchStatus::Failed,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// True once the retrieval has succeeded or failed.
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Succeeded(_) | FetchState::Failed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Succeeded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Human-readable error message for display.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

impl<T> From<Result<T, FetchError>> for FetchState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => FetchState::Succeeded(data),
            Err(err) => FetchState::Failed(err),
        }
    }
}
