//! Error types for backend adapters.

use menuscan_core::ErrorCode;

/// Errors from a cache store. Callers treat every variant as a miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The store rejected or failed the command.
    #[error("cache command failed: {0}")]
    Command(String),

    /// The store could not be reached.
    #[error("cache unavailable: {reason}")]
    Unavailable { reason: String },

    /// A probe got an answer it did not expect.
    #[error("unexpected cache reply: {0}")]
    UnexpectedReply(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_dropped() || err.is_connection_refusal() || err.is_timeout() {
            Self::unavailable(err.to_string())
        } else {
            Self::Command(err.to_string())
        }
    }
}

/// Normalized outcome class of a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendErrorKind {
    /// The backend does not know the resource.
    NotFound,
    /// The backend failed while handling the request. Also used for
    /// backend error codes the gateway does not recognize.
    ProcessingError,
    /// The backend could not be reached or did not answer in time.
    Unavailable,
}

impl BackendErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::ProcessingError => "processing_error",
            Self::Unavailable => "unavailable",
        }
    }

    /// The precise client-facing code for this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound => ErrorCode::NotFound,
            Self::ProcessingError => ErrorCode::ProcessingError,
            Self::Unavailable => ErrorCode::Unavailable,
        }
    }
}

/// A failed call to the menu service: a kind plus the backend's message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {message}", kind.as_str())]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::NotFound, message)
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::ProcessingError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Unavailable, message)
    }
}

/// Errors from the search index.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request never got a response.
    #[error("search transport error: {0}")]
    Transport(String),

    /// The index answered with a non-success status.
    #[error("search backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("invalid search response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::not_found("Dish 42 not found");
        assert_eq!(err.to_string(), "not_found: Dish 42 not found");
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(BackendErrorKind::NotFound.code(), ErrorCode::NotFound);
        assert_eq!(
            BackendErrorKind::ProcessingError.code(),
            ErrorCode::ProcessingError
        );
        assert_eq!(BackendErrorKind::Unavailable.code(), ErrorCode::Unavailable);
    }

    #[test]
    fn test_search_error_display() {
        let err = SearchError::Status {
            status: 400,
            body: "bad query".to_string(),
        };
        assert_eq!(err.to_string(), "search backend returned 400: bad query");
    }
}
