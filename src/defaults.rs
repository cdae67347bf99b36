//! Default Configuration Values
//!
//! Centralizes the default values used when building requests and clients.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("formpost/", env!("CARGO_PKG_VERSION"));
}

/// Target URL defaults used when no URL components are supplied
pub mod url {
    pub const SCHEME: &str = "http";
    pub const HOST: &str = "localhost";
    pub const PORT: u16 = 80;
    pub const PATH: &str = "/";
}

/// Body encoding defaults
pub mod content {
    /// Content type of URL-encoded form bodies
    pub const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";

    /// Content type for binary parts that do not declare one
    pub const OCTET_STREAM: &str = "application/octet-stream";

    /// Number of random characters in a generated multipart boundary.
    ///
    /// 32 alphanumerics carry roughly 190 bits of randomness; the boundary is
    /// not checked against part content.
    pub const BOUNDARY_RANDOM_LEN: usize = 32;

    /// Fixed prefix in front of the random boundary characters
    pub const BOUNDARY_PREFIX: &str = "----formpost-";
}
