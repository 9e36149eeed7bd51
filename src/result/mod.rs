//! Normalized call results, buffered or streaming.

pub mod buffered;
pub mod stream;

pub use buffered::Response;
pub use stream::{ChunkReceiver, ChunkSender, ResponseStream, StreamError};

use crate::event::HeaderValue;
use bytes::Bytes;
use std::collections::HashMap;

/// Body of a call result.
#[derive(Debug)]
pub enum ResponseBody {
    /// Fully materialized bytes of a buffered result.
    Bytes(Bytes),
    /// Readable end of a streaming result's chunk channel.
    Channel(ChunkReceiver),
}

/// Capability set shared by buffered and streaming results.
///
/// Exactly two implementors exist, [`Response`] and [`ResponseStream`],
/// and consumers dispatch on [`is_stream`](CallResult::is_stream) rather
/// than downcasting.
pub trait CallResult: Send {
    /// Whether the result streams.
    fn is_stream(&self) -> bool;

    /// Response headers.
    fn headers(&self) -> &HashMap<String, HeaderValue>;

    /// Response content type.
    fn content_type(&self) -> &str;

    /// Response status code. For a streaming result this reads 0 until
    /// the stream is finalized with a code.
    fn status_code(&self) -> u16;

    /// Body of the result.
    ///
    /// A buffered result yields its bytes on every call; a streaming
    /// result's channel can be taken only once, after which this returns
    /// `None`.
    fn take_body(&mut self) -> Option<ResponseBody>;
}
