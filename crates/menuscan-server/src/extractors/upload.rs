//! Multipart menu upload.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::StatusCode,
};
use menuscan_core::{ImageUpload, RawExtractionOptions};
use tracing::debug;

use crate::error::ApiError;

/// Form field carrying the image file.
pub const IMAGE_FIELD: &str = "image";
/// Optional form field with extraction options as JSON.
pub const OPTIONS_FIELD: &str = "options";

/// A parsed `multipart/form-data` upload.
///
/// A body that is not multipart, or has no `image` part, yields
/// `image: None`; the orchestrator decides how to report that.
#[derive(Debug, Default)]
pub struct MenuUpload {
    pub image: Option<ImageUpload>,
    pub options: RawExtractionOptions,
}

impl<S> FromRequest<S> for MenuUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = match Multipart::from_request(req, state).await {
            Ok(multipart) => multipart,
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "Upload is not multipart");
                return Ok(Self::default());
            },
        };

        let mut upload = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(field_error)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(IMAGE_FIELD) => {
                    let mime_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(field_error)?;
                    upload.image = Some(ImageUpload::new(bytes.to_vec(), mime_type));
                },
                Some(OPTIONS_FIELD) => {
                    let text = field.text().await.map_err(field_error)?;
                    if !text.trim().is_empty() {
                        upload.options = serde_json::from_str(&text).map_err(|e| {
                            ApiError::InvalidUpload(format!("options is not valid JSON: {}", e))
                        })?;
                    }
                },
                _ => {},
            }
        }

        Ok(upload)
    }
}

fn field_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::InvalidUpload("image exceeds the upload size limit".to_string())
    } else {
        ApiError::InvalidUpload(err.body_text())
    }
}
