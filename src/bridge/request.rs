//! Outgoing request assembly and header coercion.

use super::BridgeError;
use crate::event::Event;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderName, HeaderValue as HttpHeaderValue, CONTENT_TYPE};
use hyper::{Method, Request};
use tracing::warn;

/// Content type applied when an event or a transport response carries
/// none.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Assemble the outgoing HTTP request for one function call.
///
/// Scheme is plain HTTP, host comes from the resolver, path and body are
/// taken verbatim from the event. An empty method resolves to GET for an
/// empty body and POST otherwise; a method the typed HTTP layer rejects
/// falls back to the same default with a warning. An empty content type
/// resolves to text/plain. Header entries are coerced per value kind;
/// entries without a wire representation are dropped with a warning,
/// never failing the call.
pub(crate) fn build_request(
    host: &str,
    event: &dyn Event,
) -> Result<Request<Full<Bytes>>, BridgeError> {
    let method = resolve_method(event.method(), event.body());

    let content_type = match event.content_type() {
        "" => DEFAULT_CONTENT_TYPE,
        other => other,
    };

    let path = event.path();
    let uri = if path.starts_with('/') {
        format!("http://{}{}", host, path)
    } else {
        format!("http://{}/{}", host, path)
    };

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type);

    for (name, value) in event.headers() {
        let text = match value.to_wire() {
            Some(text) => text,
            None => {
                warn!("Dropping header '{}' with unsupported value type", name);
                continue;
            }
        };

        match (
            HeaderName::from_bytes(name.as_bytes()),
            HttpHeaderValue::from_str(&text),
        ) {
            (Ok(header_name), Ok(header_value)) => {
                builder = builder.header(header_name, header_value);
            }
            _ => {
                warn!("Dropping header '{}' rejected by the http layer", name);
            }
        }
    }

    let body = Full::new(Bytes::copy_from_slice(event.body()));
    builder.body(body).map_err(BridgeError::from)
}

fn resolve_method(method: &str, body: &[u8]) -> Method {
    if !method.is_empty() {
        match Method::from_bytes(method.as_bytes()) {
            Ok(method) => return method,
            Err(_) => {
                warn!("Invalid method '{}', falling back to the default", method);
            }
        }
    }

    if body.is_empty() {
        Method::GET
    } else {
        Method::POST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MemoryEvent;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts warn-level events emitted on the current thread.
    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for WarnCounter {
        fn enabled(&self, metadata: &tracing::Metadata<'_>) -> bool {
            *metadata.level() == tracing::Level::WARN
        }

        fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }

        fn record(&self, _id: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _id: &tracing::span::Id, _follows: &tracing::span::Id) {}

        fn event(&self, _event: &tracing::Event<'_>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn enter(&self, _id: &tracing::span::Id) {}

        fn exit(&self, _id: &tracing::span::Id) {}
    }

    #[test]
    fn test_empty_method_defaults_to_get_without_body() {
        let event = MemoryEvent::new("/fn");
        let request = build_request("ns-f:8080", &event).unwrap();
        assert_eq!(request.method(), Method::GET);
    }

    #[test]
    fn test_empty_method_defaults_to_post_with_body() {
        let event = MemoryEvent::new("/fn").with_body("payload");
        let request = build_request("ns-f:8080", &event).unwrap();
        assert_eq!(request.method(), Method::POST);
    }

    #[test]
    fn test_explicit_method_is_verbatim() {
        let event = MemoryEvent::new("/fn").with_method("DELETE");
        let request = build_request("ns-f:8080", &event).unwrap();
        assert_eq!(request.method(), Method::DELETE);
    }

    #[test]
    fn test_empty_content_type_defaults_to_text_plain() {
        let event = MemoryEvent::new("/fn");
        let request = build_request("ns-f:8080", &event).unwrap();
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            DEFAULT_CONTENT_TYPE
        );
    }

    #[test]
    fn test_uri_combines_host_and_path() {
        let event = MemoryEvent::new("/api/items");
        let request = build_request("ns-f:8080", &event).unwrap();
        assert_eq!(request.uri().to_string(), "http://ns-f:8080/api/items");
    }

    #[test]
    fn test_path_without_leading_slash_is_normalized() {
        let event = MemoryEvent::new("items");
        let request = build_request("f:8080", &event).unwrap();
        assert_eq!(request.uri().to_string(), "http://f:8080/items");
    }

    #[test]
    fn test_header_coercion_table() {
        let event = MemoryEvent::new("/fn")
            .with_header("x-str", "value")
            .with_header("x-int", 42)
            .with_header("x-bool", true)
            .with_header("x-bytes", b"raw".to_vec())
            .with_header("x-json", serde_json::json!({"a": 1}));

        let request = build_request("f:8080", &event).unwrap();
        let headers = request.headers();

        assert_eq!(headers.get("x-str").unwrap(), "value");
        assert_eq!(headers.get("x-int").unwrap(), "42");
        assert_eq!(headers.get("x-bool").unwrap(), "true");
        assert_eq!(headers.get("x-bytes").unwrap(), "raw");
        // Unsupported kinds are dropped, the call proceeds.
        assert!(headers.get("x-json").is_none());
    }

    #[test]
    fn test_invalid_header_name_is_dropped_not_fatal() {
        let event = MemoryEvent::new("/fn").with_header("bad name", "value");
        let request = build_request("f:8080", &event).unwrap();
        assert!(request.headers().get("bad name").is_none());
    }

    #[test]
    fn test_invalid_method_falls_back_to_default() {
        let event = MemoryEvent::new("/fn").with_method("BAD METHOD");
        let request = build_request("f:8080", &event).unwrap();
        assert_eq!(request.method(), Method::GET);

        let event = MemoryEvent::new("/fn").with_method("BAD METHOD").with_body("x");
        let request = build_request("f:8080", &event).unwrap();
        assert_eq!(request.method(), Method::POST);
    }

    #[test]
    fn test_one_warning_per_dropped_header() {
        let counter = WarnCounter::default();
        let warnings = counter.0.clone();

        let event = MemoryEvent::new("/fn")
            .with_header("x-first", serde_json::json!({"a": 1}))
            .with_header("x-second", serde_json::json!([1, 2]))
            .with_header("x-kept", "fine");

        tracing::subscriber::with_default(counter, || {
            build_request("f:8080", &event).unwrap();
        });

        assert_eq!(warnings.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_no_warning_when_nothing_is_dropped() {
        let counter = WarnCounter::default();
        let warnings = counter.0.clone();

        let event = MemoryEvent::new("/fn").with_header("x-kept", "fine");

        tracing::subscriber::with_default(counter, || {
            build_request("f:8080", &event).unwrap();
        });

        assert_eq!(warnings.load(Ordering::SeqCst), 0);
    }
}
