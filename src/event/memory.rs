//! In-memory event implementation for function chaining.

use super::{Event, HeaderValue};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// In-memory [`Event`] with builder-style setters.
///
/// The usual vehicle for function chaining: a handler fills one in and
/// hands it to [`FunctionBridge::call_function`](crate::bridge::FunctionBridge::call_function).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryEvent {
    /// HTTP method. Empty means "let the bridge pick a default".
    pub method: String,
    /// Content type. Empty means "text/plain" once built.
    pub content_type: String,
    /// Request body.
    pub body: Bytes,
    /// Request path.
    pub path: String,
    /// Header mapping with heterogeneous values.
    pub headers: HashMap<String, HeaderValue>,
}

impl MemoryEvent {
    /// Create an event for the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

impl Event for MemoryEvent {
    fn method(&self) -> &str {
        &self.method
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn body(&self) -> &[u8] {
        &self.body
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn headers(&self) -> &HashMap<String, HeaderValue> {
        &self.headers
    }
}
