//! Error Handling Module
//!
//! Form submission is a pass-through layer: it adds no failure modes of its
//! own beyond malformed URLs or headers. Everything else comes from the
//! HTTP client or from a multipart part's byte source and is surfaced as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use formpost::error::{ErrorCategory, FormError};
//!
//! let error = FormError::api_error(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub(crate) use conversions::mark_body_error;
pub use types::*;
