//! Cancellation utilities
//!
//! Dropping a submission future already aborts it. `CancelHandle` adds an
//! explicit signal that can be shared across tasks and observed both by the
//! whole submission and by a multipart body while it streams.

use crate::error::{FormError, Result, mark_body_error};
use bytes::Bytes;
use futures::Stream;
use std::future::Future;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;

/// Boxed body byte stream.
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

/// Run `future` until it completes or `handle` is cancelled.
pub async fn run_cancellable<F, T>(handle: &CancelHandle, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        _ = handle.cancelled() => Err(FormError::Cancelled),
        res = future => res,
    }
}

/// Make a body stream observe `handle`.
///
/// Cancellation ends the stream with an `Interrupted` error instead of a
/// clean end-of-stream, so a truncated body is never taken as complete.
pub fn make_cancellable_body(stream: ByteStream, handle: CancelHandle) -> ByteStream {
    let mut inner = stream;
    let s = async_stream::stream! {
        use futures::StreamExt;
        loop {
            let next = tokio::select! {
                _ = handle.cancelled() => Err(mark_body_error(std::io::Error::new(
                    std::io::ErrorKind::Interrupted,
                    "body streaming cancelled",
                ))),
                item = inner.next() => match item {
                    Some(item) => item,
                    None => break,
                },
            };
            let failed = next.is_err();
            yield next;
            if failed {
                break;
            }
        }
    };
    Box::pin(s)
}
