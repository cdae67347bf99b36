//! Form submission
//!
//! Two helpers on top of any [`HttpClient`]:
//! - `submit_form`: flat key/value data, either as query parameters (GET)
//!   or as an `application/x-www-form-urlencoded` body (POST).
//! - `submit_form_with_binary_data`: a `multipart/form-data` body (POST).
//!
//! Each has a `_to` variant taking [`UrlComponents`]. The order of decisions
//! is fixed: encoder defaults, then the URL components, then the caller's
//! `customize` callback, which may overwrite any of them.
//!
//! # Example
//!
//! ```rust,ignore
//! use formpost::prelude::*;
//!
//! let client = ReqwestHttpClient::new()?;
//! let form: Parameters = [("q", "cats")].into_iter().collect();
//! let page: String = client
//!     .submit_form_to(UrlComponents::default().with_path("/search"), form, true, no_customization)
//!     .await?;
//! ```

use crate::error::Result;
use crate::execution::content::{FormDataContent, MultiPartFormDataContent};
use crate::execution::http::{FromResponse, HttpClient, HttpRequestBuilder, UrlComponents};
use crate::types::{Parameters, PartData};
use async_trait::async_trait;
use reqwest::Method;

/// Default customization: leaves the request untouched.
pub fn no_customization(_request: &mut HttpRequestBuilder) {}

/// Build the request `submit_form` would send, without the callback.
///
/// With `url_encoded` the method is GET and every pair of `form_data` is
/// appended to the query; otherwise the method is POST and the pairs become
/// the URL-encoded body while the query is left alone.
pub fn prepare_form_request(
    form_data: Parameters,
    url_encoded: bool,
) -> Result<HttpRequestBuilder> {
    let mut request = HttpRequestBuilder::new();
    if url_encoded {
        request.set_method(Method::GET);
        request.url.parameters_mut().append_parameters(&form_data);
    } else {
        request.set_method(Method::POST);
        request.set_body(FormDataContent::new(form_data))?;
    }
    Ok(request)
}

/// Build the request `submit_form_with_binary_data` would send, without the
/// callback. Always POST with a multipart body; zero parts is allowed.
pub fn prepare_multipart_request(parts: Vec<PartData>) -> Result<HttpRequestBuilder> {
    let mut request = HttpRequestBuilder::new();
    request.set_method(Method::POST);
    request.set_body(MultiPartFormDataContent::new(parts))?;
    Ok(request)
}

async fn dispatch<T, C>(client: &C, request: HttpRequestBuilder) -> Result<T>
where
    T: FromResponse,
    C: HttpClient + ?Sized,
{
    tracing::debug!(
        method = %request.method,
        path = %request.url.encoded_path_and_query(),
        body = request.body().kind(),
        "submitting form"
    );
    let response = client.execute(request).await?;
    T::from_response(response)
}

/// Submit `form_data` to the request's default target.
pub async fn submit_form<T, C, F>(
    client: &C,
    form_data: Parameters,
    url_encoded: bool,
    customize: F,
) -> Result<T>
where
    T: FromResponse,
    C: HttpClient + ?Sized,
    F: FnOnce(&mut HttpRequestBuilder),
{
    let mut request = prepare_form_request(form_data, url_encoded)?;
    customize(&mut request);
    dispatch(client, request).await
}

/// Submit `form_data` to the URL built from `target`.
pub async fn submit_form_to<T, C, F>(
    client: &C,
    target: UrlComponents,
    form_data: Parameters,
    url_encoded: bool,
    customize: F,
) -> Result<T>
where
    T: FromResponse,
    C: HttpClient + ?Sized,
    F: FnOnce(&mut HttpRequestBuilder),
{
    let mut request = prepare_form_request(form_data, url_encoded)?;
    request.url_components(target);
    customize(&mut request);
    dispatch(client, request).await
}

/// POST `parts` as `multipart/form-data`.
pub async fn submit_form_with_binary_data<T, C, F>(
    client: &C,
    parts: Vec<PartData>,
    customize: F,
) -> Result<T>
where
    T: FromResponse,
    C: HttpClient + ?Sized,
    F: FnOnce(&mut HttpRequestBuilder),
{
    let mut request = prepare_multipart_request(parts)?;
    customize(&mut request);
    dispatch(client, request).await
}

/// POST `parts` as `multipart/form-data` to the URL built from `target`.
pub async fn submit_form_with_binary_data_to<T, C, F>(
    client: &C,
    target: UrlComponents,
    parts: Vec<PartData>,
    customize: F,
) -> Result<T>
where
    T: FromResponse,
    C: HttpClient + ?Sized,
    F: FnOnce(&mut HttpRequestBuilder),
{
    let mut request = prepare_multipart_request(parts)?;
    request.url_components(target);
    customize(&mut request);
    dispatch(client, request).await
}

/// The submission helpers as methods on any [`HttpClient`].
#[async_trait]
pub trait FormSubmitExt: HttpClient {
    async fn submit_form<T, F>(
        &self,
        form_data: Parameters,
        url_encoded: bool,
        customize: F,
    ) -> Result<T>
    where
        T: FromResponse + Send,
        F: FnOnce(&mut HttpRequestBuilder) + Send,
    {
        submit_form(self, form_data, url_encoded, customize).await
    }

    async fn submit_form_to<T, F>(
        &self,
        target: UrlComponents,
        form_data: Parameters,
        url_encoded: bool,
        customize: F,
    ) -> Result<T>
    where
        T: FromResponse + Send,
        F: FnOnce(&mut HttpRequestBuilder) + Send,
    {
        submit_form_to(self, target, form_data, url_encoded, customize).await
    }

    async fn submit_form_with_binary_data<T, F>(
        &self,
        parts: Vec<PartData>,
        customize: F,
    ) -> Result<T>
    where
        T: FromResponse + Send,
        F: FnOnce(&mut HttpRequestBuilder) + Send,
    {
        submit_form_with_binary_data(self, parts, customize).await
    }

    async fn submit_form_with_binary_data_to<T, F>(
        &self,
        target: UrlComponents,
        parts: Vec<PartData>,
        customize: F,
    ) -> Result<T>
    where
        T: FromResponse + Send,
        F: FnOnce(&mut HttpRequestBuilder) + Send,
    {
        submit_form_with_binary_data_to(self, target, parts, customize).await
    }
}

impl<C: HttpClient + ?Sized> FormSubmitExt for C {}
