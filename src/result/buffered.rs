//! Buffered call result.

use super::{CallResult, ResponseBody};
use crate::event::HeaderValue;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fully buffered call result.
///
/// Returned by the invocation bridge once a transport response has been
/// normalized, and constructible directly by function handlers that want
/// to return a materialized response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code.
    pub status_code: u16,
    /// Content type.
    pub content_type: String,
    /// Response headers.
    pub headers: HashMap<String, HeaderValue>,
    /// Response body.
    pub body: Bytes,
}

impl Response {
    /// Create a response with the given status code.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            content_type: "text/plain".to_string(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Create an empty 200 response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Create a 200 text response.
    pub fn text(content: impl Into<String>) -> Self {
        Self::ok().with_body(content.into())
    }

    /// Create a 200 response with a JSON body.
    pub fn json<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(data)?;
        let mut response = Self::ok().with_body(body);
        response.content_type = "application/json".to_string();
        Ok(response)
    }

    /// Create an error response with a text message.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(status_code).with_body(message.into())
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Body decoded as (lossy) text.
    pub fn text_body(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Body parsed as JSON.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

impl CallResult for Response {
    fn is_stream(&self) -> bool {
        false
    }

    fn headers(&self) -> &HashMap<String, HeaderValue> {
        &self.headers
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn take_body(&mut self) -> Option<ResponseBody> {
        Some(ResponseBody::Bytes(self.body.clone()))
    }
}
