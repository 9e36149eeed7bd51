//! Heterogeneous header values carried by events.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A header value attached to an [`Event`](crate::event::Event).
///
/// Closed set of kinds the request builder knows how to put on the wire.
/// `Json` carries structured values that have no header representation;
/// the builder drops such entries with a warning instead of failing the
/// call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Bytes(Bytes),
    Json(serde_json::Value),
}

impl HeaderValue {
    /// Coerce the value to its on-wire string form.
    ///
    /// Strings pass through, integers render in decimal, booleans as
    /// "true"/"false", raw bytes are decoded as (lossy) text. Returns
    /// `None` for kinds with no header representation.
    pub fn to_wire(&self) -> Option<String> {
        match self {
            HeaderValue::Str(value) => Some(value.clone()),
            HeaderValue::Int(value) => Some(value.to_string()),
            HeaderValue::Bool(value) => Some(value.to_string()),
            HeaderValue::Bytes(value) => Some(String::from_utf8_lossy(value).to_string()),
            HeaderValue::Json(_) => None,
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Str(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Str(value)
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        HeaderValue::Int(value)
    }
}

impl From<i32> for HeaderValue {
    fn from(value: i32) -> Self {
        HeaderValue::Int(value as i64)
    }
}

impl From<bool> for HeaderValue {
    fn from(value: bool) -> Self {
        HeaderValue::Bool(value)
    }
}

impl From<Bytes> for HeaderValue {
    fn from(value: Bytes) -> Self {
        HeaderValue::Bytes(value)
    }
}

impl From<Vec<u8>> for HeaderValue {
    fn from(value: Vec<u8>) -> Self {
        HeaderValue::Bytes(Bytes::from(value))
    }
}

impl From<serde_json::Value> for HeaderValue {
    fn from(value: serde_json::Value) -> Self {
        HeaderValue::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_passes_through() {
        assert_eq!(
            HeaderValue::from("abc").to_wire(),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_int_renders_decimal() {
        assert_eq!(HeaderValue::from(42i64).to_wire(), Some("42".to_string()));
        assert_eq!(HeaderValue::from(-7i32).to_wire(), Some("-7".to_string()));
    }

    #[test]
    fn test_bool_renders_lowercase() {
        assert_eq!(HeaderValue::from(true).to_wire(), Some("true".to_string()));
        assert_eq!(HeaderValue::from(false).to_wire(), Some("false".to_string()));
    }

    #[test]
    fn test_bytes_decode_as_text() {
        assert_eq!(
            HeaderValue::from(b"raw".to_vec()).to_wire(),
            Some("raw".to_string())
        );
    }

    #[test]
    fn test_json_has_no_wire_form() {
        let value = HeaderValue::from(serde_json::json!({"nested": true}));
        assert_eq!(value.to_wire(), None);
    }
}
