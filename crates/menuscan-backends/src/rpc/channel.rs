//! RPC endpoints and their connectivity probe.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

use crate::error::BackendError;

/// A configured gRPC endpoint (menu service, image service).
#[derive(Debug, Clone)]
pub struct RpcEndpoint {
    name: String,
    uri: String,
    endpoint: Endpoint,
}

impl RpcEndpoint {
    /// Parses `uri` (`http://host:port`). Connection is not attempted.
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        connect_timeout: Duration,
    ) -> Result<Self, BackendError> {
        let uri = uri.into();
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| BackendError::unavailable(format!("invalid endpoint {}: {}", uri, e)))?
            .connect_timeout(connect_timeout);

        Ok(Self {
            name: name.into(),
            uri,
            endpoint,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// A channel that connects on first use and reconnects on failure.
    pub fn connect_lazy(&self) -> Channel {
        self.endpoint.connect_lazy()
    }

    /// Opens a fresh connection to check reachability.
    pub async fn probe(&self) -> Result<(), BackendError> {
        self.endpoint
            .connect()
            .await
            .map(drop)
            .map_err(|e| BackendError::unavailable(format!("{}: {}", self.uri, e)))
    }
}
