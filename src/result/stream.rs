//! Streaming call result with a pipe-like chunk channel.

use super::{CallResult, ResponseBody};
use crate::event::HeaderValue;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

/// Sending half of a streaming result's chunk channel.
pub type ChunkSender = mpsc::Sender<Bytes>;
/// Receiving half of a streaming result's chunk channel.
pub type ChunkReceiver = mpsc::Receiver<Bytes>;

/// Channel capacity for streams created by [`ResponseStream::new`].
const CHANNEL_CAPACITY: usize = 16;

/// Read buffer size used by [`ResponseStream::stream_from`].
const COPY_BUF_SIZE: usize = 8 * 1024;

/// Error produced by stream write operations.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The stream was already finalized. Expected signal to late writers;
    /// the producer should stop writing.
    #[error("stream already closed")]
    Closed,
    /// The consumer dropped its receiving end mid-stream.
    #[error("stream consumer disconnected")]
    Disconnected,
    /// Reading from the source failed during [`ResponseStream::stream_from`].
    #[error("failed to read from stream source")]
    Read(#[from] std::io::Error),
}

/// Writer-side state. One lock per stream guards both fields.
#[derive(Debug)]
struct WriterState {
    /// Present from construction until the first close, permanently
    /// absent afterwards.
    sender: Option<ChunkSender>,
    /// Terminal status code, set at finalization.
    status_code: Option<u16>,
}

/// Streaming call result.
///
/// A producer writes chunks with [`write_chunk`](Self::write_chunk) or
/// copies them in with [`stream_from`](Self::stream_from) while a consumer
/// reads from the channel taken via
/// [`take_body`](CallResult::take_body). The producer must finalize on
/// exactly one path, success or failure. After that, every further write
/// observes [`StreamError::Closed`] and the consumer reaches
/// end-of-stream.
#[derive(Debug)]
pub struct ResponseStream {
    content_type: String,
    headers: HashMap<String, HeaderValue>,
    state: Mutex<WriterState>,
    body: Option<ChunkReceiver>,
}

impl ResponseStream {
    /// Create a stream backed by a fresh chunk channel.
    pub fn new(content_type: impl Into<String>, headers: HashMap<String, HeaderValue>) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self::with_channel(content_type, headers, sender, receiver)
    }

    /// Create a stream over externally supplied channel endpoints.
    ///
    /// Same invariants as [`new`](Self::new): the sender is owned by this
    /// stream until the first close.
    pub fn with_channel(
        content_type: impl Into<String>,
        headers: HashMap<String, HeaderValue>,
        sender: ChunkSender,
        receiver: ChunkReceiver,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            headers,
            state: Mutex::new(WriterState {
                sender: Some(sender),
                status_code: None,
            }),
            body: Some(receiver),
        }
    }

    // A poisoned lock only means another writer panicked mid-call; the
    // state itself is a plain Option pair and stays usable.
    fn lock_state(&self) -> MutexGuard<'_, WriterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Clone of the live sender, or None once closed. Only the lookup is
    // in the critical section; the byte transfer happens on the clone so
    // a finalizer is never blocked on a slow send.
    fn sender(&self) -> Option<ChunkSender> {
        self.lock_state().sender.clone()
    }

    /// Write one chunk to the stream.
    ///
    /// Returns the number of bytes written, [`StreamError::Closed`] if the
    /// stream was already finalized, or [`StreamError::Disconnected`] if
    /// the consumer dropped its receiver.
    pub async fn write_chunk(&self, chunk: impl Into<Bytes>) -> Result<usize, StreamError> {
        let sender = self.sender().ok_or(StreamError::Closed)?;
        let chunk = chunk.into();
        let written = chunk.len();
        sender
            .send(chunk)
            .await
            .map_err(|_| StreamError::Disconnected)?;
        Ok(written)
    }

    /// Copy chunks from a reader until it is exhausted.
    ///
    /// Long-running and possibly blocking on channel backpressure; the
    /// lock is only taken briefly per chunk for the handle lookup. A
    /// finalize during the copy fails the next chunk with
    /// [`StreamError::Closed`]. Returns the number of bytes copied.
    pub async fn stream_from<R>(&self, mut reader: R) -> Result<u64, StreamError>
    where
        R: AsyncRead + Unpin,
    {
        if self.sender().is_none() {
            return Err(StreamError::Closed);
        }

        let mut buf = vec![0u8; COPY_BUF_SIZE];
        let mut copied = 0u64;

        loop {
            let read = reader.read(&mut buf).await?;
            if read == 0 {
                break;
            }
            // Handle re-checked per chunk; a close between chunks cuts
            // the copy off here instead of draining the source.
            let sender = self.sender().ok_or(StreamError::Closed)?;
            sender
                .send(Bytes::copy_from_slice(&buf[..read]))
                .await
                .map_err(|_| StreamError::Disconnected)?;
            copied += read as u64;
        }

        Ok(copied)
    }

    /// Finalize the stream.
    ///
    /// Records the terminal status code if one is supplied, then closes
    /// the writer. The close half is idempotent; repeated calls with a
    /// status code overwrite it, so the owner must finalize on exactly
    /// one path.
    pub fn finalize(&self, status_code: Option<u16>) {
        let mut state = self.lock_state();
        if let Some(code) = status_code {
            state.status_code = Some(code);
        }
        state.sender = None;
    }

    /// Close the writer without touching the status code.
    pub fn close_writer(&self) {
        self.lock_state().sender = None;
    }
}

impl CallResult for ResponseStream {
    fn is_stream(&self) -> bool {
        true
    }

    fn headers(&self) -> &HashMap<String, HeaderValue> {
        &self.headers
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Reads under the stream lock; a concurrent finalizer may be
    /// writing the code.
    fn status_code(&self) -> u16 {
        self.lock_state().status_code.unwrap_or(0)
    }

    fn take_body(&mut self) -> Option<ResponseBody> {
        self.body.take().map(ResponseBody::Channel)
    }
}
