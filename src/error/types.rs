//! Core error types

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors surfaced by form submission.
#[derive(Error, Debug)]
pub enum FormError {
    /// Transport failure reported by the HTTP client
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Connection could not be established
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request timed out inside the HTTP client
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    /// Non-success status, when the client enforces status checks
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// A multipart part's byte source failed while the body was streamed.
    /// The original error is kept so callers see its kind and message.
    #[error("IO error: {0}")]
    IoError(#[source] std::io::Error),

    /// Target URL could not be assembled
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Header name or value rejected
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Response could not be decoded into the requested type
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The operation was cancelled through a `CancelHandle`
    #[error("Request cancelled")]
    Cancelled,
}

/// Coarse error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Client,
    Server,
    Io,
    Validation,
    Parsing,
    Cancelled,
}

impl FormError {
    /// Create an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create an `ApiError` carrying a decoded error body.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status code, if the error came from a response.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::ConnectionError(_) | Self::TimeoutError(_) => {
                ErrorCategory::Network
            }
            Self::ApiError { code, .. } if *code >= 500 => ErrorCategory::Server,
            Self::ApiError { .. } => ErrorCategory::Client,
            Self::IoError(_) => ErrorCategory::Io,
            Self::InvalidUrl(_) | Self::InvalidHeader(_) | Self::ConfigurationError(_) => {
                ErrorCategory::Validation
            }
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::Cancelled => ErrorCategory::Cancelled,
        }
    }

    /// Whether the caller may reasonably retry.
    ///
    /// This layer never retries on its own; the flag is advisory.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::ConnectionError(_) | Self::TimeoutError(_) => true,
            Self::ApiError { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}
