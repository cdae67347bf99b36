//! HTTP client abstraction
//!
//! Form submission only assembles requests. Sending them, connection
//! handling and response decoding belong to an [`HttpClient`]
//! implementation, which sees the finished [`HttpRequestBuilder`].

use super::request::HttpRequestBuilder;
use crate::error::{FormError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Raw response returned by an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| FormError::ParseError(format!("Response body is not UTF-8: {e}")))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Executes assembled requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequestBuilder) -> Result<HttpResponse>;
}

#[async_trait]
impl<C> HttpClient for std::sync::Arc<C>
where
    C: HttpClient + ?Sized,
{
    async fn execute(&self, request: HttpRequestBuilder) -> Result<HttpResponse> {
        (**self).execute(request).await
    }
}

/// Typed result of a submission.
///
/// The caller names the expected shape as a type parameter, e.g.
/// `submit_form::<String, _, _>` or `Json<MyReply>`.
pub trait FromResponse: Sized {
    fn from_response(response: HttpResponse) -> Result<Self>;
}

impl FromResponse for HttpResponse {
    fn from_response(response: HttpResponse) -> Result<Self> {
        Ok(response)
    }
}

impl FromResponse for String {
    fn from_response(response: HttpResponse) -> Result<Self> {
        response.text()
    }
}

impl FromResponse for Bytes {
    fn from_response(response: HttpResponse) -> Result<Self> {
        Ok(response.body)
    }
}

impl FromResponse for Vec<u8> {
    fn from_response(response: HttpResponse) -> Result<Self> {
        Ok(response.body.to_vec())
    }
}

impl FromResponse for () {
    fn from_response(_response: HttpResponse) -> Result<Self> {
        Ok(())
    }
}

/// JSON-decoded response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned> FromResponse for Json<T> {
    fn from_response(response: HttpResponse) -> Result<Self> {
        response.json().map(Json)
    }
}
