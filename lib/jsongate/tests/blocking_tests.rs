//! Integration tests for `BlockingDispatcher`.
//!
//! The mock server runs on its own multi-threaded runtime so the blocking
//! calls are made from plain test threads.

use assert2::{check, let_assert};
use jsongate::{
    BlockingDispatcher, BodyEncoding, ClientConfig, Outcome, Params, RequestSpec,
    ResponseHandling,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

#[derive(Debug, PartialEq, Eq, Deserialize)]
struct Token {
    value: String,
    ttl: u32,
}

fn server_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("runtime")
}

#[test]
fn blocking_post_form() {
    let runtime = server_runtime();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("user=alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "token": {"value": "abc", "ttl": 60}
            })))
            .expect(1)
            .mount(&server)
            .await;
        server
    });

    let dispatcher = BlockingDispatcher::new().expect("dispatcher");
    let handling = ResponseHandling::new().expect("status", "ok").single("token");
    let outcome: Outcome<Token> = dispatcher
        .post(
            format!("{}/login", server.uri()),
            Params::new().with("user", "alice").with("password", "secret"),
            None,
            BodyEncoding::FormUrlEncoded,
            &handling,
        )
        .expect("dispatch");

    check!(
        outcome.into_single()
            == Some(Token {
                value: "abc".to_string(),
                ttl: 60
            })
    );

    runtime.block_on(server.verify());
}

#[test]
fn blocking_get_and_dispatch_share_a_dispatcher() {
    let runtime = server_runtime();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": [1, 2]})),
            )
            .expect(2)
            .mount(&server)
            .await;
        server
    });

    let config = ClientConfig::builder()
        .default_header("Accept", "application/json")
        .build();
    let dispatcher = BlockingDispatcher::with_config(config).expect("dispatcher");
    let handling = ResponseHandling::new().expect("code", "0").list("data");

    let first: Outcome<u32> = dispatcher
        .get(
            format!("{}/items/{{id}}", server.uri()),
            Params::new().with("id", 2),
            &handling,
        )
        .expect("get");
    check!(first.into_vec() == Some(vec![1, 2]));

    let spec = RequestSpec::get(format!("{}/items/2", server.uri()));
    let second: Outcome<Value> = dispatcher.dispatch(&spec, &handling).expect("dispatch");
    check!(second.into_vec() == Some(vec![json!(1), json!(2)]));

    runtime.block_on(server.verify());
}

#[test]
fn blocking_business_failure() {
    let runtime = server_runtime();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "401"})))
            .mount(&server)
            .await;
        server
    });

    let dispatcher = BlockingDispatcher::new().expect("dispatcher");
    let handling = ResponseHandling::new().expect("code", "200").single("data");
    let_assert!(
        Ok(Outcome::Failure(mismatches)) =
            dispatcher.get::<Value>(server.uri(), Params::new(), &handling)
    );
    check!(mismatches.get("code") == Some("returned: 401; expected: 200"));
}
