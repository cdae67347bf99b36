mod support;

use formpost::prelude::*;
use formpost::{submit_form, submit_form_to};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use support::RecordingClient;

fn params(pairs: &[(&str, &str)]) -> Parameters {
    pairs.iter().copied().collect()
}

#[tokio::test]
async fn url_encoded_form_is_a_get_with_query() {
    let client = RecordingClient::new();

    let reply: String = client
        .submit_form(params(&[("q", "cats")]), true, no_customization)
        .await
        .expect("submit");

    assert_eq!(reply, "ok");
    let sent = client.last();
    assert_eq!(sent.method, Method::GET);
    assert_eq!(sent.path_and_query, "/?q=cats");
    assert_eq!(sent.url, "http://localhost/?q=cats");
    assert!(sent.body.is_empty());
    assert!(sent.header("content-type").is_none());
}

#[tokio::test]
async fn url_encoded_form_keeps_order_and_duplicates() {
    let client = RecordingClient::new();
    let form = params(&[("tag", "a b"), ("id", "1"), ("tag", "c&d")]);

    let _: () = client
        .submit_form(form, true, no_customization)
        .await
        .unwrap();

    let sent = client.last();
    assert_eq!(sent.path_and_query, "/?tag=a+b&tag=c%26d&id=1");
    assert_eq!(
        Parameters::parse_form_urlencoded(sent.path_and_query.trim_start_matches("/?")),
        params(&[("tag", "a b"), ("tag", "c&d"), ("id", "1")])
    );
}

#[tokio::test]
async fn url_encoded_form_appends_to_existing_query() {
    let client = RecordingClient::new();

    let _: () = client
        .submit_form(params(&[("q", "cats")]), true, |request| {
            request.parameter("lang", "en");
        })
        .await
        .unwrap();

    assert_eq!(client.last().path_and_query, "/?q=cats&lang=en");
}

#[tokio::test]
async fn body_form_is_a_post_that_round_trips() {
    let client = RecordingClient::new();
    let form = params(&[("user", "Zoë"), ("note", "1+1=2 & 100%"), ("note", "")]);

    let _: () = client
        .submit_form(form.clone(), false, no_customization)
        .await
        .unwrap();

    let sent = client.last();
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.path_and_query, "/");
    assert_eq!(
        sent.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(Parameters::parse_form_urlencoded(&sent.body_text()), form);
}

#[tokio::test]
async fn empty_form_defaults() {
    let client = RecordingClient::new();

    let _: () = client
        .submit_form(Parameters::EMPTY, false, no_customization)
        .await
        .unwrap();

    let sent = client.last();
    assert_eq!(sent.method, Method::POST);
    assert!(sent.body.is_empty());
}

#[tokio::test]
async fn customize_runs_last_and_wins() {
    let client = RecordingClient::new();

    let _: () = client
        .submit_form(params(&[("a", "1")]), false, |request| {
            request.set_method(Method::PUT);
            request.header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
            );
            request.try_header("x-trace", "abc").unwrap();
        })
        .await
        .unwrap();

    let sent = client.last();
    assert_eq!(sent.method, Method::PUT);
    assert_eq!(
        sent.header("content-type"),
        Some("application/x-www-form-urlencoded; charset=UTF-8")
    );
    assert_eq!(sent.header("x-trace"), Some("abc"));
    assert_eq!(sent.body_text(), "a=1");
}

#[tokio::test]
async fn url_components_are_applied_before_customize() {
    let client = RecordingClient::new();
    let target = UrlComponents::new("https", "forms.example.com", 8443, "/submit");

    let _: () = client
        .submit_form_to(target, params(&[("q", "x")]), true, no_customization)
        .await
        .unwrap();
    assert_eq!(client.last().url, "https://forms.example.com:8443/submit?q=x");

    let target = UrlComponents::default().with_path("/first");
    let _: () = submit_form_to(&client, target, params(&[("q", "x")]), true, |request| {
        request.url.set_path("/second");
    })
    .await
    .unwrap();
    assert_eq!(client.last().url, "http://localhost/second?q=x");
}

#[tokio::test]
async fn free_function_infers_typed_result() {
    let client = RecordingClient::replying(r#"{"accepted":true}"#);

    #[derive(serde::Deserialize)]
    struct Accepted {
        accepted: bool,
    }

    let Json(reply) = submit_form::<Json<Accepted>, _, _>(
        &client,
        params(&[("k", "v")]),
        false,
        no_customization,
    )
    .await
    .unwrap();
    assert!(reply.accepted);
    assert_eq!(client.count(), 1);
}
