//! Invocation bridge: one HTTP round trip to a deployed function.

pub mod host;
mod request;
pub mod transport;

pub use request::DEFAULT_CONTENT_TYPE;
pub use transport::{HttpTransport, Transport, TransportBody, TransportError};

use crate::event::{Event, HeaderValue};
use crate::result::Response;
use http_body_util::BodyExt;
use hyper::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Error returned by [`FunctionBridge::call_function`].
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The outgoing request could not be assembled.
    #[error("invalid outgoing request")]
    Request(#[from] hyper::http::Error),
    /// The transport failed to complete the round trip. Connection
    /// refused, timeout and malformed response all land here; the source
    /// error carries the detail.
    #[error("failed to call function '{name}'")]
    Dispatch {
        name: String,
        #[source]
        source: TransportError,
    },
}

/// Bridge configuration: where the calling function is deployed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Deployment kind; "local" resolves namespace-qualified hosts.
    pub kind: String,
    /// Namespace the functions are deployed in.
    pub namespace: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            kind: "local".to_string(),
            namespace: "default".to_string(),
        }
    }
}

impl BridgeConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deployment kind.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// Client-side bridge for invoking deployed functions by name.
pub struct FunctionBridge {
    config: BridgeConfig,
    transport: Arc<dyn Transport>,
}

impl FunctionBridge {
    /// Create a bridge backed by the pooled HTTP transport.
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Create a bridge over a custom transport.
    pub fn with_transport(config: BridgeConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Invoke a deployed function and buffer its response.
    ///
    /// One round trip, no retries. Every transport failure surfaces as
    /// [`BridgeError::Dispatch`] with the underlying error attached.
    pub async fn call_function(
        &self,
        function_name: &str,
        event: &dyn Event,
    ) -> Result<Response, BridgeError> {
        let host = host::resolve(&self.config.kind, &self.config.namespace, function_name);
        let outgoing = request::build_request(&host, event)?;

        debug!("Calling function '{}' at {}", function_name, host);

        let response = self
            .transport
            .round_trip(outgoing)
            .await
            .map_err(|source| BridgeError::Dispatch {
                name: function_name.to_string(),
                source,
            })?;

        normalize_response(function_name, response).await
    }
}

/// Normalize a transport response into an owned buffered [`Response`].
///
/// Status code is copied verbatim, a missing content type defaults to
/// text/plain, headers are copied entry-by-entry into a fresh map and the
/// body is collected into owned bytes, so the result stays valid once the
/// transport response is gone.
async fn normalize_response(
    function_name: &str,
    response: hyper::Response<TransportBody>,
) -> Result<Response, BridgeError> {
    let status_code = response.status().as_u16();

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let mut headers = HashMap::with_capacity(response.headers().len());
    for (name, value) in response.headers() {
        let text = String::from_utf8_lossy(value.as_bytes()).to_string();
        headers.insert(name.as_str().to_string(), HeaderValue::Str(text));
    }

    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|source| BridgeError::Dispatch {
            name: function_name.to_string(),
            source,
        })?
        .to_bytes();

    Ok(Response {
        status_code,
        content_type,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = BridgeConfig::new().kind("kube").namespace("orders");
        assert_eq!(config.kind, "kube");
        assert_eq!(config.namespace, "orders");
    }

    #[test]
    fn test_config_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.kind, "local");
        assert_eq!(config.namespace, "default");
    }
}
