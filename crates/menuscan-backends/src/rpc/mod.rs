//! Menu service RPC adapter.
//!
//! The gateway talks to the extraction (menu) service through the
//! [`MenuBackend`] trait. Every invocation is exactly one outstanding call:
//! no batching, no retry and no deadline beyond the transport default.
//! Failures are normalized into [`BackendError`].

mod channel;
mod client;
pub mod proto;

use async_trait::async_trait;
use menuscan_core::{ExtractionOptions, LookupOptions, ResourceKind};
use serde_json::Value;
use tonic::Code;

use crate::error::{BackendError, BackendErrorKind};

pub use channel::RpcEndpoint;
pub use client::MenuServiceClient;

/// A menu image to run through extraction.
#[derive(Debug, Clone)]
pub struct ProcessImageRequest {
    pub image: Vec<u8>,
    /// Image format derived from the MIME subtype (`png`, `jpeg`, ...).
    pub format: String,
    pub options: ExtractionOptions,
}

/// The extraction/menu service as seen by the orchestrator.
///
/// Implementations never touch the cache.
///
/// # Implementors
///
/// - `MenuServiceClient` - gRPC client for `menu.MenuService`
#[async_trait]
pub trait MenuBackend: Send + Sync {
    /// Runs extraction on a menu image.
    async fn process_menu_image(
        &self,
        request: ProcessImageRequest,
    ) -> Result<Value, BackendError>;

    /// Fetches one dish, optionally with similar dishes attached.
    async fn get_dish(&self, dish_id: &str, include_similar: bool) -> Result<Value, BackendError>;

    /// Fetches a resource by kind and id.
    ///
    /// Menus have no retrieval procedure on the menu service, so a menu
    /// fetch always reports `NotFound`.
    async fn fetch(
        &self,
        kind: ResourceKind,
        id: &str,
        options: &LookupOptions,
    ) -> Result<Value, BackendError> {
        match kind {
            ResourceKind::Dish => self.get_dish(id, options.include_similar).await,
            ResourceKind::Menu => Err(BackendError::not_found(format!(
                "menu {} is not retrievable from the menu service",
                id
            ))),
        }
    }

    /// Returns the name of this backend, for logs.
    fn name(&self) -> &str;
}

/// Maps a gRPC status code to the gateway's backend error kinds.
///
/// Transport-level failures (unreachable, deadline, cancelled) are
/// `Unavailable`; any other code, known or not, is `ProcessingError`.
pub fn classify_status(code: Code) -> BackendErrorKind {
    match code {
        Code::NotFound => BackendErrorKind::NotFound,
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
            BackendErrorKind::Unavailable
        },
        _ => BackendErrorKind::ProcessingError,
    }
}

impl From<tonic::Status> for BackendError {
    fn from(status: tonic::Status) -> Self {
        BackendError::new(classify_status(status.code()), status.message())
    }
}
