//! Transport seam over the pooled hyper client.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

/// Boxed error surfaced by transport round trips.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;
/// Boxed response body returned by the transport.
pub type TransportBody = BoxBody<Bytes, TransportError>;

/// One HTTP round trip to a deployed function.
///
/// Connection pooling, timeouts and resource release are the
/// implementor's concern; request and response objects are dropped on
/// every exit path, success or failure.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn round_trip(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<TransportBody>, TransportError>;
}

/// Production transport over the pooled `hyper_util` legacy client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HttpTransport {
    /// Create a transport with its own connection pool.
    pub fn new() -> Self {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);

        Self {
            client: Client::builder(TokioExecutor::new()).build(connector),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn round_trip(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<TransportBody>, TransportError> {
        let response = self.client.request(request).await?;
        Ok(response.map(|body| body.map_err(|err| Box::new(err) as TransportError).boxed()))
    }
}
