//! `multipart/form-data` body
//!
//! Framing follows RFC 2046/7578: every part starts with `--<boundary>` CRLF,
//! then its headers, a blank line and the content followed by CRLF. The body
//! ends with `--<boundary>--` CRLF. There is no preamble or epilogue.

use crate::defaults::content::{BOUNDARY_PREFIX, BOUNDARY_RANDOM_LEN};
use crate::error::{FormError, Result, mark_body_error};
use crate::types::parts::{PartData, part_header_block};
use crate::utils::cancel::{ByteStream, CancelHandle, make_cancellable_body};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Generate a fresh boundary token.
///
/// The token is random, not verified against part content.
pub fn generate_boundary() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{BOUNDARY_PREFIX}{random}")
}

/// Multipart body over an ordered list of parts.
///
/// The body is single-use: [`into_stream`](Self::into_stream) takes ownership
/// and drains each part's source once, in input order.
#[derive(Debug)]
pub struct MultiPartFormDataContent {
    parts: Vec<PartData>,
    boundary: String,
    cancel: Option<CancelHandle>,
}

impl MultiPartFormDataContent {
    pub fn new(parts: Vec<PartData>) -> Self {
        let boundary = generate_boundary();
        tracing::trace!(boundary = %boundary, parts = parts.len(), "multipart boundary generated");
        Self {
            parts,
            boundary,
            cancel: None,
        }
    }

    /// Use a caller-chosen boundary.
    pub fn with_boundary(parts: Vec<PartData>, boundary: impl Into<String>) -> Self {
        Self {
            parts,
            boundary: boundary.into(),
            cancel: None,
        }
    }

    /// Abort streaming with an `Interrupted` error once `handle` is cancelled.
    pub fn with_cancel(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn parts(&self) -> &[PartData] {
        &self.parts
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode lazily. A part's headers are rendered before its delimiter is
    /// written, so an unrepresentable header fails the body instead of
    /// emitting a malformed section.
    pub fn into_stream(self) -> ByteStream {
        let Self {
            parts,
            boundary,
            cancel,
        } = self;

        let delimiter = Bytes::from(format!("--{boundary}\r\n"));
        let closing = Bytes::from(format!("--{boundary}--\r\n"));

        let stream: ByteStream = Box::pin(async_stream::stream! {
            for part in parts {
                let header_block = match part_header_block(&part) {
                    Ok(block) => block,
                    Err(e) => {
                        yield Err(mark_body_error(into_io_error(e)));
                        return;
                    }
                };
                yield Ok(delimiter.clone());
                yield Ok(header_block);
                match part {
                    PartData::FormItem { value, .. } => {
                        yield Ok(Bytes::from(value));
                    }
                    PartData::BinaryItem { source, .. } | PartData::FileItem { source, .. } => {
                        let mut chunks = source.into_stream();
                        while let Some(chunk) = chunks.next().await {
                            match chunk {
                                Ok(chunk) => yield Ok(chunk),
                                Err(e) => {
                                    // Remaining sources are dropped (closed) with the stream.
                                    yield Err(mark_body_error(e));
                                    return;
                                }
                            }
                        }
                    }
                }
                yield Ok(Bytes::from_static(b"\r\n"));
            }
            yield Ok(closing);
        });

        match cancel {
            Some(handle) => make_cancellable_body(stream, handle),
            None => stream,
        }
    }

    /// Drain the whole body into memory.
    pub async fn into_bytes(self) -> Result<Bytes> {
        let mut stream = self.into_stream();
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

fn into_io_error(err: FormError) -> std::io::Error {
    match err {
        FormError::IoError(io) => io,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, other.to_string()),
    }
}
