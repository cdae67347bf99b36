//! formpost
//!
//! Form and multipart request helpers layered on a pluggable async HTTP
//! client. The crate decides method, target URL and wire-format body; the
//! [`HttpClient`](execution::http::HttpClient) does the transport.
#![deny(unsafe_code)]

pub mod defaults;
pub mod error;
pub mod execution;
pub mod forms;
pub mod observability;
pub mod types;
pub mod utils;

pub use error::FormError;
pub use execution::content::{FormDataContent, MultiPartFormDataContent, RequestBody};
pub use execution::http::{
    FromResponse, HttpClient, HttpConfig, HttpRequestBuilder, HttpResponse, Json,
    ReqwestHttpClient, UrlBuilder, UrlComponents,
};
pub use forms::{
    FormSubmitExt, no_customization, prepare_form_request, prepare_multipart_request,
    submit_form, submit_form_to, submit_form_with_binary_data, submit_form_with_binary_data_to,
};
pub use types::{FormDataBuilder, Parameters, ParametersBuilder, PartData, PartSource};

/// Commonly used items.
pub mod prelude {
    pub use crate::error::FormError;
    pub use crate::execution::http::{
        FromResponse, HttpClient, HttpRequestBuilder, HttpResponse, Json, ReqwestHttpClient,
        UrlComponents,
    };
    pub use crate::forms::{FormSubmitExt, no_customization};
    pub use crate::types::{FormDataBuilder, Parameters, PartData, PartSource};
    pub use crate::utils::CancelHandle;
}
