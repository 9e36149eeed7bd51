//! # Uplink - Function Invocation Bridge
//!
//! Uplink is a client-side bridge that invokes remotely deployed
//! functions over HTTP and returns either a fully-buffered response or a
//! live, incrementally-written response stream. It is meant for function
//! chaining (one function triggering another) and for handlers that
//! stream partial output to a caller while still computing.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   call_function("pricing", event)   ┌──────────────┐
//! │   Handler    │ ──────────────────────────────────▶ │FunctionBridge│
//! └──────────────┘                                     └──────┬───────┘
//!                                                             │ http://ns-pricing:8080/…
//!                                                             ▼
//!                                                      ┌──────────────┐
//!                                                      │   Deployed   │
//!                                                      │   function   │
//!                                                      └──────────────┘
//! ```
//!
//! ## Calling a function
//!
//! ```rust,no_run
//! use uplink::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let bridge = FunctionBridge::new(BridgeConfig::new().kind("local").namespace("orders"));
//!
//!     let event = MemoryEvent::new("/items")
//!         .with_content_type("application/json")
//!         .with_body(r#"{"sku": "a-1"}"#)
//!         .with_header("x-request-id", "abc-123");
//!
//!     let response = bridge.call_function("pricing", &event).await?;
//!     println!("{} {}", response.status_code, response.text_body());
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming a response
//!
//! A handler that wants to deliver output while still computing creates a
//! [`ResponseStream`], hands the readable channel to its caller and
//! writes chunks until it finalizes the stream on exactly one path:
//!
//! ```rust
//! use uplink::prelude::*;
//! use std::collections::HashMap;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut stream = ResponseStream::new("text/plain", HashMap::new());
//! let mut body = match stream.take_body() {
//!     Some(ResponseBody::Channel(receiver)) => receiver,
//!     _ => unreachable!(),
//! };
//!
//! stream.write_chunk(&b"first chunk"[..]).await.unwrap();
//! stream.finalize(Some(200));
//!
//! while let Some(chunk) = body.recv().await {
//!     // deliver the chunk to the caller
//!     let _ = chunk;
//! }
//! assert_eq!(stream.status_code(), 200);
//! # }
//! ```
//!
//! Writes after finalization fail with [`StreamError::Closed`], the
//! expected "stream already ended" signal, not a program error.

pub mod bridge;
pub mod event;
pub mod result;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::bridge::{BridgeConfig, BridgeError, FunctionBridge, Transport};
    pub use crate::event::{Event, HeaderValue, MemoryEvent};
    pub use crate::result::{CallResult, Response, ResponseBody, ResponseStream, StreamError};
}

// Re-export for convenience
pub use bridge::{BridgeConfig, BridgeError, FunctionBridge};
pub use event::{Event, HeaderValue, MemoryEvent};
pub use result::{CallResult, Response, ResponseBody, ResponseStream, StreamError};
