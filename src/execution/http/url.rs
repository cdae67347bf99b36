//! Target URL assembly

use crate::defaults;
use crate::error::{FormError, Result};
use crate::types::{Parameters, ParametersBuilder};
use crate::types::parameters::form_url_encode_pairs;

/// Scheme, host, port and path of a target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlComponents {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Default for UrlComponents {
    fn default() -> Self {
        Self {
            scheme: defaults::url::SCHEME.to_string(),
            host: defaults::url::HOST.to_string(),
            port: defaults::url::PORT,
            path: defaults::url::PATH.to_string(),
        }
    }
}

impl UrlComponents {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        path: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
            path: path.into(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

/// Mutable target URL of a request.
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    components: UrlComponents,
    parameters: ParametersBuilder,
}

impl UrlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn components(&self) -> &UrlComponents {
        &self.components
    }

    /// Replace scheme, host, port and path. Query parameters are kept.
    pub fn set_components(&mut self, components: UrlComponents) -> &mut Self {
        self.components = components;
        self
    }

    pub fn set_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.components.scheme = scheme.into();
        self
    }

    pub fn set_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.components.host = host.into();
        self
    }

    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.components.port = port;
        self
    }

    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.components.path = path.into();
        self
    }

    pub fn parameters(&self) -> &ParametersBuilder {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParametersBuilder {
        &mut self.parameters
    }

    /// Take every component and query pair from an absolute URL string.
    /// Parsed query pairs are appended to the existing ones.
    pub fn take_from(&mut self, url: &str) -> Result<&mut Self> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| FormError::InvalidUrl(format!("'{url}': {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| FormError::InvalidUrl(format!("'{url}' has no host")))?;
        let port = parsed
            .port_or_known_default()
            .ok_or_else(|| FormError::InvalidUrl(format!("'{url}' has no port")))?;

        self.components = UrlComponents::new(parsed.scheme(), host, port, parsed.path());
        for (key, value) in parsed.query_pairs() {
            self.parameters.append(key.into_owned(), value.into_owned());
        }
        Ok(self)
    }

    /// Path plus encoded query, e.g. `/search?q=cats`.
    pub fn encoded_path_and_query(&self) -> String {
        let path = &self.components.path;
        let mut out = if path.starts_with('/') {
            path.clone()
        } else {
            format!("/{path}")
        };
        let query = self.query_string();
        if !query.is_empty() {
            out.push('?');
            out.push_str(&query);
        }
        out
    }

    /// Encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        let parameters: Parameters = self.parameters.snapshot();
        form_url_encode_pairs(parameters.pairs())
    }

    /// Render the full URL. The port is omitted when it is the scheme default.
    pub fn build(&self) -> Result<reqwest::Url> {
        let UrlComponents {
            scheme, host, port, ..
        } = &self.components;
        // IPv6 literals need brackets in the authority.
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.clone()
        };
        let authority = if default_port(scheme) == Some(*port) {
            host
        } else {
            format!("{host}:{port}")
        };
        let raw = format!("{scheme}://{authority}{}", self.encoded_path_and_query());
        reqwest::Url::parse(&raw).map_err(|e| FormError::InvalidUrl(format!("'{raw}': {e}")))
    }
}
