//! reqwest-backed HTTP client
//!
//! Client construction from [`HttpConfig`] plus the default [`HttpClient`]
//! implementation used to dispatch assembled form requests.

use super::request::HttpRequestBuilder;
use super::transport::{HttpClient, HttpResponse};
use crate::defaults;
use crate::error::{FormError, Result};
use crate::execution::content::RequestBody;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout
    #[serde(with = "duration_option_serde")]
    pub timeout: Option<Duration>,
    /// Connection timeout
    #[serde(with = "duration_option_serde")]
    pub connect_timeout: Option<Duration>,
    /// Default headers sent with every request
    pub headers: HashMap<String, String>,
    /// Proxy settings
    pub proxy: Option<String>,
    /// User agent
    pub user_agent: Option<String>,
    /// Turn non-2xx responses into `FormError::ApiError`
    pub error_for_status: bool,
}

// Helper module for Duration serialization
mod duration_option_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => d.as_secs().serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs: Option<u64> = Option::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(defaults::http::REQUEST_TIMEOUT),
            connect_timeout: Some(defaults::http::CONNECT_TIMEOUT),
            headers: HashMap::new(),
            proxy: None,
            user_agent: Some(defaults::http::USER_AGENT.to_string()),
            error_for_status: true,
        }
    }
}

impl HttpConfig {
    /// The default headers, validated.
    pub fn header_map(&self) -> Result<HeaderMap> {
        self.headers
            .iter()
            .map(|(name, value)| -> Result<(HeaderName, HeaderValue)> {
                Ok((
                    HeaderName::from_bytes(name.as_bytes())?,
                    HeaderValue::from_str(value)?,
                ))
            })
            .collect()
    }
}

/// [`HttpClient`] on top of `reqwest::Client`.
///
/// Multipart bodies are streamed; a failing part source aborts the request
/// instead of completing it with a truncated body.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    error_for_status: bool,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Build the underlying `reqwest::Client` from `config`.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().default_headers(config.header_map()?);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| FormError::ConfigurationError(format!("proxy '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| FormError::ConfigurationError(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            error_for_status: config.error_for_status,
        })
    }

    /// Wrap an existing client; non-2xx responses become errors.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            error_for_status: true,
        }
    }

    pub fn error_for_status(mut self, enabled: bool) -> Self {
        self.error_for_status = enabled;
        self
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, mut request: HttpRequestBuilder) -> Result<HttpResponse> {
        let url = request.url.build()?;
        let body = request.take_body();
        tracing::debug!(
            method = %request.method,
            url = %url,
            body = body.kind(),
            "sending request"
        );

        let mut builder = self
            .client
            .request(request.method, url.clone())
            .headers(request.headers);
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::FormUrlEncoded(content) => builder.body(content.bytes()),
            RequestBody::Multipart(content) => {
                builder.body(reqwest::Body::wrap_stream(content.into_stream()))
            }
            RequestBody::Bytes { data, .. } => builder.body(data),
        };

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        if self.error_for_status && !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "request failed");
            let message = String::from_utf8_lossy(&body).into_owned();
            return Err(match serde_json::from_slice::<serde_json::Value>(&body) {
                Ok(details) => FormError::api_error_with_details(status.as_u16(), message, details),
                Err(_) => FormError::api_error(status.as_u16(), message),
            });
        }

        Ok(HttpResponse::new(status, headers, body))
    }
}
