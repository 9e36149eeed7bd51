//! Event abstraction describing an outbound function call.

pub mod header;
pub mod memory;

pub use header::HeaderValue;
pub use memory::MemoryEvent;

use std::collections::HashMap;
use std::sync::OnceLock;

/// Caller-supplied description of an outbound call.
///
/// Only method, content type, body and path are required; `headers` has a
/// default implementation returning an empty map, so callers that don't
/// need headers only implement the four accessors.
///
/// Accessors return the raw fields. Defaulting (empty method, empty
/// content type) is applied by the invocation bridge when the outgoing
/// request is built.
pub trait Event: Send + Sync {
    /// HTTP method, possibly empty.
    fn method(&self) -> &str;

    /// Content type, possibly empty.
    fn content_type(&self) -> &str;

    /// Request body.
    fn body(&self) -> &[u8];

    /// Request path.
    fn path(&self) -> &str;

    /// Header mapping with heterogeneous values.
    fn headers(&self) -> &HashMap<String, HeaderValue> {
        static EMPTY: OnceLock<HashMap<String, HeaderValue>> = OnceLock::new();
        EMPTY.get_or_init(HashMap::new)
    }

    /// Look up a single header value.
    fn header(&self, key: &str) -> Option<&HeaderValue> {
        self.headers().get(key)
    }
}
