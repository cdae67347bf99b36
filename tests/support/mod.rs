//! Test support: an in-memory `HttpClient` that records what it was asked to send.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use formpost::error::FormError;
use formpost::execution::http::{HttpClient, HttpRequestBuilder, HttpResponse};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::sync::Mutex;

/// Request as seen by the client, with the body fully drained.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("utf-8 body")
    }

    /// Boundary from the multipart Content-Type header.
    pub fn boundary(&self) -> String {
        self.header("content-type")
            .and_then(|ct| ct.split("boundary=").nth(1))
            .expect("multipart content type")
            .to_string()
    }
}

/// Records every executed request and answers with a fixed body.
pub struct RecordingClient {
    pub requests: Mutex<Vec<RecordedRequest>>,
    reply: Bytes,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::replying("ok")
    }

    pub fn replying(reply: impl Into<Bytes>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            reply: reply.into(),
        }
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("a recorded request")
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn execute(&self, mut request: HttpRequestBuilder) -> Result<HttpResponse, FormError> {
        let url = request.url.build()?.to_string();
        let path_and_query = request.url.encoded_path_and_query();
        // A failing body source fails the call before anything is recorded.
        let body = request.take_body().into_bytes().await?;
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url,
            path_and_query,
            headers: request.headers,
            body,
        });
        Ok(HttpResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            self.reply.clone(),
        ))
    }
}

/// Split a multipart body on its delimiter, returning (preamble, sections, trailer).
pub fn split_multipart(body: &str, boundary: &str) -> (String, Vec<String>, String) {
    let delimiter = format!("--{boundary}");
    let mut pieces: Vec<String> = body.split(&delimiter).map(str::to_string).collect();
    let trailer = pieces.pop().expect("trailer");
    let preamble = pieces.remove(0);
    (preamble, pieces, trailer)
}
