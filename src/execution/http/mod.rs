//! HTTP Utilities
//!
//! This module contains the request side of form submission:
//! - Request representation and URL assembly
//! - The `HttpClient` abstraction and typed responses
//! - The reqwest-backed client and its configuration

pub mod client;
pub mod request;
pub mod transport;
pub mod url;

// Re-export main types
pub use client::*;
pub use request::*;
pub use transport::*;
pub use url::*;
