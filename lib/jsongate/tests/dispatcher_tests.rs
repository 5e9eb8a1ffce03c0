//! Integration tests for `Dispatcher` against a wiremock server.

use std::collections::HashMap;
use std::time::Duration;

use assert2::{check, let_assert};
use jsongate::{
    BodyEncoding, ClientConfig, Dispatcher, Error, ErrorKind, HyperClient, Outcome, Params, Part,
    Payload, RequestSpec, ResponseHandling, Shape,
};
use serde::Deserialize;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, header, method, path},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct User {
    id: u64,
    name: String,
}

fn gated(field: &str) -> ResponseHandling {
    ResponseHandling::new().expect("code", "200").single(field)
}

#[tokio::test]
async fn get_with_placeholders_and_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "200",
            "msg": "ok",
            "data": {"id": 7, "name": "Alice"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::new();
    let outcome: Outcome<User> = dispatcher
        .get(
            format!("{}/users/{{id}}", server.uri()),
            Params::new().with("id", 7),
            &gated("data"),
        )
        .await
        .expect("dispatch");

    check!(
        outcome
            == Outcome::Success(Payload::Single(User {
                id: 7,
                name: "Alice".to_string()
            }))
    );
}

#[tokio::test]
async fn get_query_values_are_percent_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(wiremock::matchers::query_param("q", "a b&c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "hits": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome: Outcome<i64> = Dispatcher::new()
        .get(
            format!("{}/search?q={{q}}", server.uri()),
            Params::new().with("q", "a b&c"),
            &gated("hits"),
        )
        .await
        .expect("dispatch");

    check!(outcome.into_single() == Some(3));
}

#[tokio::test]
async fn business_failure_reports_mismatch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": "500", "data": null})),
        )
        .mount(&server)
        .await;

    let outcome: Outcome<User> = Dispatcher::new()
        .get(format!("{}/users/1", server.uri()), Params::new(), &gated("data"))
        .await
        .expect("dispatch");

    let_assert!(Some(mismatches) = outcome.mismatches());
    insta::assert_snapshot!(mismatches.to_string(), @"code: returned: 500; expected: 200");
}

#[tokio::test]
async fn post_form_list_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/search"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header("X-Tenant", "acme"))
        .and(body_string_contains("role=admin"))
        .and(body_string_contains("tag=a"))
        .and(body_string_contains("tag=b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [
                {"id": 3, "name": "C"},
                {"id": 1, "name": "A"},
                {"id": 2, "name": "B"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handling = ResponseHandling::new().expect("code", "200").list("data");
    let outcome: Outcome<User> = Dispatcher::new()
        .post(
            format!("{}/users/search", server.uri()),
            Params::new().with("role", "admin").with("tag", json!(["a", "b"])),
            Some(HashMap::from([("X-Tenant".to_string(), "acme".to_string())])),
            BodyEncoding::FormUrlEncoded,
            &handling,
        )
        .await
        .expect("dispatch");

    let_assert!(Some(users) = outcome.into_vec());
    let ids: Vec<u64> = users.iter().map(|user| user.id).collect();
    check!(ids == vec![3, 1, 2]);
}

#[tokio::test]
async fn post_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "Bob", "admin": false})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"code": "200", "data": {"id": 42, "name": "Bob"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome: Outcome<User> = Dispatcher::new()
        .post(
            format!("{}/users", server.uri()),
            Params::new().with("name", "Bob").with("admin", false),
            None,
            BodyEncoding::Json,
            &gated("data"),
        )
        .await
        .expect("dispatch");

    check!(outcome.into_single().map(|user| user.id) == Some(42));
}

#[tokio::test]
async fn post_multipart_with_file_part() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("hello upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "200", "data": "stored"})))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::post(format!("{}/upload", server.uri()), BodyEncoding::Multipart)
        .param("title", "notes")
        .part(Part::file("file", "notes.txt", "hello upload"));

    let outcome: Outcome<String> = Dispatcher::new()
        .dispatch(&spec, &gated("data"))
        .await
        .expect("dispatch");

    check!(outcome.into_single().as_deref() == Some("stored"));
}

#[tokio::test]
async fn text_response_is_parsed_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/legacy"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain")
                .set_body_string(r#"{"state": true, "rows": [{"id": 1, "name": "x"}]}"#),
        )
        .mount(&server)
        .await;

    let handling = ResponseHandling::new().text().expect("state", "true").list("rows");
    let outcome: Outcome<User> = Dispatcher::new()
        .get(format!("{}/legacy", server.uri()), Params::new(), &handling)
        .await
        .expect("dispatch");

    check!(outcome.is_success());
}

#[tokio::test]
async fn whole_body_passthrough() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "503", "x": 1})))
        .mount(&server)
        .await;

    let handling = ResponseHandling::new()
        .expect("code", "200")
        .whole_body(Shape::Single);
    let outcome: Outcome<Value> = Dispatcher::new()
        .get(format!("{}/raw", server.uri()), Params::new(), &handling)
        .await
        .expect("dispatch");

    check!(outcome.into_single() == Some(json!({"code": "503", "x": 1})));
}

#[tokio::test]
async fn http_error_status_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let_assert!(
        Err(err) = Dispatcher::new()
            .get::<Value>(format!("{}/missing", server.uri()), Params::new(), &gated("data"))
            .await
    );
    check!(err.kind() == ErrorKind::Transport);
    check!(err.status() == Some(404));
    let_assert!(Some(Ok(body)) = err.decode_body::<Value>());
    check!(body == json!({"error": "not found"}));
}

#[tokio::test]
async fn malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let_assert!(
        Err(err) = Dispatcher::new()
            .get::<Value>(format!("{}/html", server.uri()), Params::new(), &gated("data"))
            .await
    );
    check!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn configuration_error_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let_assert!(
        Err(err) = Dispatcher::new()
            .get::<Value>(
                format!("{}/users/{{id}}", server.uri()),
                Params::new(),
                &gated("data")
            )
            .await
    );
    check!(err.is_configuration());
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": "200"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = HyperClient::with_config(
        ClientConfig::builder()
            .timeout(Duration::from_millis(100))
            .build(),
    );
    let_assert!(
        Err(err) = Dispatcher::with_client(client)
            .get::<Value>(format!("{}/slow", server.uri()), Params::new(), &gated("data"))
            .await
    );
    check!(err.is_timeout());
}

#[tokio::test]
async fn connection_refused() {
    let_assert!(
        Err(err) = Dispatcher::new()
            .get::<Value>("http://127.0.0.1:1/", Params::new(), &ResponseHandling::new())
            .await
    );
    check!(err.kind() == ErrorKind::Transport);
}

#[tokio::test]
async fn default_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("X-Api-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "200", "data": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .default_header("X-Api-Key", "secret")
        .build();
    let outcome: Outcome<u8> = Dispatcher::with_config(config)
        .get(format!("{}/ping", server.uri()), Params::new(), &gated("data"))
        .await
        .expect("dispatch");

    check!(outcome.into_single() == Some(1));
}
