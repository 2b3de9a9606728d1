//! Client-facing error taxonomy.
//!
//! Every failure the gateway reports to a client resolves to one of these
//! codes. Each code has a fixed HTTP status so the transport layer never
//! has to guess.
//!
//! # Example
//!
//! ```
//! use menuscan_core::ErrorCode;
//!
//! assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
//! assert_eq!(ErrorCode::NotFound.http_status(), 404);
//! ```

use std::fmt;

use serde::{Serialize, Serializer};

/// Normalized error codes returned in `{error, code}` bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No image payload in an upload.
    MissingImage,
    /// Upload payload is not an image.
    InvalidImage,
    /// Search request without free-text term.
    MissingQuery,
    /// A query parameter failed validation (pagination, price bounds).
    InvalidParameter,
    /// Resource absent after cache and backend miss.
    NotFound,
    /// The extraction backend failed.
    ProcessingError,
    /// The search backend failed.
    SearchError,
    /// The backend could not be reached and no fallback applies.
    Unavailable,
    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// Wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingImage => "MISSING_IMAGE",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::MissingQuery => "MISSING_QUERY",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::NotFound => "NOT_FOUND",
            Self::ProcessingError => "PROCESSING_ERROR",
            Self::SearchError => "SEARCH_ERROR",
            Self::Unavailable => "UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code the transport must use for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingImage | Self::InvalidImage | Self::MissingQuery | Self::InvalidParameter => {
                400
            },
            Self::NotFound => 404,
            Self::Unavailable => 503,
            Self::ProcessingError | Self::SearchError | Self::InternalError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::MissingImage.http_status(), 400);
        assert_eq!(ErrorCode::MissingQuery.http_status(), 400);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::ProcessingError.http_status(), 500);
        assert_eq!(ErrorCode::SearchError.http_status(), 500);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
        assert_eq!(ErrorCode::Unavailable.http_status(), 503);
    }

    #[test]
    fn test_serializes_as_wire_string() {
        let json = serde_json::to_string(&ErrorCode::ProcessingError).unwrap();
        assert_eq!(json, r#""PROCESSING_ERROR""#);
    }
}
