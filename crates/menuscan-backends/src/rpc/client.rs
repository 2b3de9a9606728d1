//! gRPC client for `menu.MenuService`.

use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tracing::{debug, warn};

use super::proto::{
    DishRequest, DishResponse, GET_DISH_PATH, MenuRequest, MenuResponse, PROCESS_MENU_IMAGE_PATH,
    ProcessingOptions,
};
use super::{MenuBackend, ProcessImageRequest, RpcEndpoint};
use crate::error::BackendError;

/// Client for the menu service over a shared tonic `Channel`.
///
/// The channel multiplexes concurrent calls, so the client is cloned into
/// every request instead of being locked.
#[derive(Clone)]
pub struct MenuServiceClient {
    channel: Channel,
    endpoint: String,
}

impl MenuServiceClient {
    /// Creates a client that connects on first use.
    pub fn new(endpoint: &RpcEndpoint) -> Self {
        Self {
            channel: endpoint.connect_lazy(),
            endpoint: endpoint.uri().to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One unary call. Suspends the calling task until the result or the
    /// error status arrives.
    async fn unary<Req, Resp>(&self, path: &'static str, request: Req) -> Result<Resp, BackendError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let start = Instant::now();
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());

        grpc.ready().await.map_err(|e| {
            warn!(endpoint = %self.endpoint, error = %e, "Menu service not ready");
            BackendError::unavailable(format!("menu service not ready: {}", e))
        })?;

        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let result = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await;

        debug!(
            path = path,
            duration_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Menu service call completed"
        );

        result
            .map(tonic::Response::into_inner)
            .map_err(BackendError::from)
    }
}

/// Serializes a response message into the JSON handed to clients.
fn to_json<T: Serialize>(message: &T) -> Result<Value, BackendError> {
    serde_json::to_value(message)
        .map_err(|e| BackendError::processing(format!("failed to encode response: {}", e)))
}

#[async_trait]
impl MenuBackend for MenuServiceClient {
    async fn process_menu_image(
        &self,
        request: ProcessImageRequest,
    ) -> Result<Value, BackendError> {
        let options = request.options;
        let message = MenuRequest {
            image_data: request.image,
            image_url: String::new(),
            format: request.format,
            options: Some(ProcessingOptions {
                extract_prices: options.extract_prices,
                extract_descriptions: options.extract_descriptions,
                extract_ingredients: options.extract_ingredients,
                language: options.language,
                use_cache: options.use_cache,
            }),
        };

        let response: MenuResponse = self.unary(PROCESS_MENU_IMAGE_PATH, message).await?;
        to_json(&response)
    }

    async fn get_dish(&self, dish_id: &str, include_similar: bool) -> Result<Value, BackendError> {
        let message = DishRequest {
            dish_id: dish_id.to_string(),
            include_similar,
        };

        let response: DishResponse = self.unary(GET_DISH_PATH, message).await?;
        to_json(&response)
    }

    fn name(&self) -> &str {
        "menu-service"
    }
}
