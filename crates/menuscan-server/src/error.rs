//! Client-facing errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menuscan_core::ErrorCode;
use menuscan_core::search::SearchValidationError;
use serde::Serialize;
use thiserror::Error;

/// Every failure an operation reports to a client.
///
/// Only `Processing` carries backend text to the client. The other
/// variants keep backend detail in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upload without an image part.
    #[error("No image file provided")]
    MissingImage,

    /// Upload whose MIME type is not `image/*`.
    #[error("Only image files are allowed (got {mime_type})")]
    InvalidImage { mime_type: String },

    /// Malformed upload body or options.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Search without a free-text term.
    #[error("Query parameter is required")]
    MissingQuery,

    /// A query parameter failed validation.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Resource absent after cache and backend miss, or unknown route.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// The menu service failed while processing an image.
    #[error("Failed to process menu image")]
    Processing { details: String },

    /// The search backend failed.
    #[error("Search failed")]
    Search,

    /// The menu service is unreachable.
    #[error("Service temporarily unavailable")]
    Unavailable,

    /// Anything else.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingImage => ErrorCode::MissingImage,
            Self::InvalidImage { .. } => ErrorCode::InvalidImage,
            Self::InvalidUpload(_) | Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::MissingQuery => ErrorCode::MissingQuery,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::Processing { .. } => ErrorCode::ProcessingError,
            Self::Search => ErrorCode::SearchError,
            Self::Unavailable => ErrorCode::Unavailable,
            Self::Internal => ErrorCode::InternalError,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code().http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Processing { details } => Some(details.clone()),
            _ => None,
        }
    }
}

impl From<SearchValidationError> for ApiError {
    fn from(err: SearchValidationError) -> Self {
        match err {
            SearchValidationError::MissingQuery => Self::MissingQuery,
            SearchValidationError::InvalidParameter { name, reason } => {
                Self::InvalidParameter { name, reason }
            },
        }
    }
}

/// `{error, code}` body, with `details` for processing failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
            details: err.details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(ApiError::not_found("Dish")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["error"], "Dish not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_processing_error_carries_details() {
        let (status, body) = body_json(ApiError::Processing {
            details: "OCR engine crashed".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "PROCESSING_ERROR");
        assert_eq!(body["details"], "OCR engine crashed");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingQuery.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Search.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::InvalidImage {
                mime_type: "text/plain".into()
            }
            .code(),
            ErrorCode::InvalidImage
        );
    }

    #[test]
    fn test_from_validation_error() {
        let err = ApiError::from(SearchValidationError::InvalidParameter {
            name: "limit".to_string(),
            reason: "must be at most 100".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::InvalidParameter);
        assert_eq!(err.to_string(), "Invalid parameter 'limit': must be at most 100");
    }
}
