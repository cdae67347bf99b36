//! Request body content

pub mod form_data;
pub mod multipart;

pub use form_data::FormDataContent;
pub use multipart::{MultiPartFormDataContent, generate_boundary};

use crate::error::Result;
use bytes::Bytes;

/// Body attached to an [`HttpRequestBuilder`](crate::execution::http::HttpRequestBuilder).
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    FormUrlEncoded(FormDataContent),
    Multipart(MultiPartFormDataContent),
    Bytes {
        content_type: Option<String>,
        data: Bytes,
    },
}

impl RequestBody {
    /// Content type the body declares, if any.
    pub fn content_type(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::FormUrlEncoded(content) => Some(content.content_type().to_string()),
            Self::Multipart(content) => Some(content.content_type()),
            Self::Bytes { content_type, .. } => content_type.clone(),
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::FormUrlEncoded(_) => "form-urlencoded",
            Self::Multipart(_) => "multipart",
            Self::Bytes { .. } => "bytes",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Fully encode the body. Multipart sources are drained here.
    pub async fn into_bytes(self) -> Result<Bytes> {
        match self {
            Self::Empty => Ok(Bytes::new()),
            Self::FormUrlEncoded(content) => Ok(content.bytes()),
            Self::Multipart(content) => content.into_bytes().await,
            Self::Bytes { data, .. } => Ok(data),
        }
    }
}

impl From<FormDataContent> for RequestBody {
    fn from(content: FormDataContent) -> Self {
        Self::FormUrlEncoded(content)
    }
}

impl From<MultiPartFormDataContent> for RequestBody {
    fn from(content: MultiPartFormDataContent) -> Self {
        Self::Multipart(content)
    }
}
