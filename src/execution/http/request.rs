//! Request representation
//!
//! `HttpRequestBuilder` is the mutable request handed to customization
//! callbacks before dispatch. Every setter overwrites what was there, so the
//! last write wins.

use super::url::{UrlBuilder, UrlComponents};
use crate::error::Result;
use crate::execution::content::RequestBody;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

#[derive(Debug, Default)]
pub struct HttpRequestBuilder {
    pub method: Method,
    pub url: UrlBuilder,
    pub headers: HeaderMap,
    body: RequestBody,
}

impl HttpRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    /// Attach a body and write its Content-Type header.
    ///
    /// A body without a content type removes any previous Content-Type.
    pub fn set_body(&mut self, body: impl Into<RequestBody>) -> Result<&mut Self> {
        let body = body.into();
        match body.content_type() {
            Some(content_type) => {
                self.headers
                    .insert(CONTENT_TYPE, HeaderValue::from_str(&content_type)?);
            }
            None => {
                self.headers.remove(CONTENT_TYPE);
            }
        }
        self.body = body;
        Ok(self)
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Detach the body, leaving `RequestBody::Empty` behind.
    pub fn take_body(&mut self) -> RequestBody {
        std::mem::take(&mut self.body)
    }

    /// Set (replace) a header.
    pub fn header(&mut self, name: HeaderName, value: HeaderValue) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    /// Set (replace) a header from strings.
    pub fn try_header(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        Ok(self.header(name, value))
    }

    /// Append a query parameter.
    pub fn parameter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.url.parameters_mut().append(key, value);
        self
    }

    /// Set scheme, host, port and path of the target URL.
    pub fn url_components(&mut self, components: UrlComponents) -> &mut Self {
        self.url.set_components(components);
        self
    }

    /// Take the target from an absolute URL string.
    pub fn url_str(&mut self, url: &str) -> Result<&mut Self> {
        self.url.take_from(url)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::content::{FormDataContent, RequestBody};
    use crate::types::Parameters;

    #[test]
    fn set_body_writes_content_type() {
        let mut request = HttpRequestBuilder::new();
        request
            .set_body(FormDataContent::new(Parameters::EMPTY))
            .unwrap();
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );

        request.set_body(RequestBody::Empty).unwrap();
        assert!(request.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn header_after_body_wins() {
        let mut request = HttpRequestBuilder::new();
        request
            .set_body(FormDataContent::new(Parameters::EMPTY))
            .unwrap();
        request
            .try_header("content-type", "application/x-www-form-urlencoded; charset=UTF-8")
            .unwrap();
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded; charset=UTF-8"
        );
    }

    #[test]
    fn defaults_to_get_on_localhost() {
        let request = HttpRequestBuilder::new();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.build().unwrap().as_str(), "http://localhost/");
        assert!(request.body().is_empty());
    }

    #[test]
    fn url_str_replaces_target() {
        let mut request = HttpRequestBuilder::new();
        request.url_str("https://example.com/forms?x=1").unwrap();
        request.parameter("y", "2");
        assert_eq!(
            request.url.build().unwrap().as_str(),
            "https://example.com/forms?x=1&y=2"
        );
    }
}
