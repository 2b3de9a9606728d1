//! Menu image processing.

use std::time::Instant;

use menuscan_backends::ProcessImageRequest;
use menuscan_core::{ExtractionOptions, ImageUpload, RawExtractionOptions};
use serde_json::Value;
use tracing::{error, info, instrument};

use super::Orchestrator;
use crate::error::ApiError;
use crate::metrics::record_backend_call;

impl Orchestrator {
    /// Sends an uploaded menu image to the extraction service.
    ///
    /// Nothing is read from or written to the cache here; `use_cache` is
    /// forwarded and the menu service decides.
    #[instrument(skip_all, fields(mime_type = upload.as_ref().map(|u| u.mime_type.as_str())))]
    pub async fn process_image(
        &self,
        upload: Option<ImageUpload>,
        options: RawExtractionOptions,
    ) -> Result<Value, ApiError> {
        let upload = upload
            .filter(|u| !u.bytes.is_empty())
            .ok_or(ApiError::MissingImage)?;

        if !upload.is_image() {
            return Err(ApiError::InvalidImage {
                mime_type: upload.mime_type,
            });
        }

        let request = ProcessImageRequest {
            format: upload.format(),
            image: upload.bytes,
            options: ExtractionOptions::from(options),
        };
        info!(
            format = %request.format,
            size = request.image.len(),
            language = %request.options.language,
            "Processing menu image"
        );

        let start = Instant::now();
        match self.backend.process_menu_image(request).await {
            Ok(value) => {
                record_backend_call("process_image", "ok", start.elapsed());
                Ok(value)
            },
            Err(err) => {
                record_backend_call("process_image", err.kind.as_str(), start.elapsed());
                error!(backend = self.backend.name(), error = %err, "Menu processing failed");
                Err(ApiError::Processing {
                    details: err.message,
                })
            },
        }
    }
}
