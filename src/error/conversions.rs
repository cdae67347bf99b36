//! Type Conversions for FormError
//!
//! `From` implementations for the error types produced by the HTTP client,
//! part byte sources and response decoding.

use super::types::FormError;
use std::error::Error;
use std::fmt;
use std::io;

impl From<reqwest::Error> for FormError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(io) = find_body_stream_error(&err) {
            return Self::IoError(io::Error::new(io.kind(), io.to_string()));
        }
        if err.is_timeout() {
            return Self::TimeoutError(err.to_string());
        }
        if err.is_connect() {
            return Self::ConnectionError(err.to_string());
        }
        if err.is_decode() {
            return Self::ParseError(err.to_string());
        }
        Self::HttpError(err.to_string())
    }
}

impl From<io::Error> for FormError {
    fn from(err: io::Error) -> Self {
        Self::IoError(unmark_body_error(err))
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderName> for FormError {
    fn from(err: reqwest::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for FormError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

/// Tags an I/O error raised by a request body stream (a part source, a
/// header block that could not be rendered, or cancellation) so it can be
/// told apart from the transport's own I/O errors once reqwest has wrapped it.
#[derive(Debug)]
struct BodyStreamError(io::Error);

impl fmt::Display for BodyStreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Error for BodyStreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

/// Mark `err` as coming from the body stream. Kind and message are kept.
pub(crate) fn mark_body_error(err: io::Error) -> io::Error {
    io::Error::new(err.kind(), BodyStreamError(err))
}

fn unmark_body_error(err: io::Error) -> io::Error {
    if !err
        .get_ref()
        .is_some_and(|inner| inner.is::<BodyStreamError>())
    {
        return err;
    }
    let kind = err.kind();
    match err.into_inner().map(|inner| inner.downcast::<BodyStreamError>()) {
        Some(Ok(marked)) => marked.0,
        _ => io::Error::from(kind),
    }
}

fn find_body_stream_error(err: &reqwest::Error) -> Option<&io::Error> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(marked) = cause.downcast_ref::<BodyStreamError>() {
            return Some(&marked.0);
        }
        if let Some(marked) = cause
            .downcast_ref::<io::Error>()
            .and_then(|io| io.get_ref())
            .and_then(|inner| inner.downcast_ref::<BodyStreamError>())
        {
            return Some(&marked.0);
        }
        source = cause.source();
    }
    None
}
