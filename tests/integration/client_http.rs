//! HTTP client tests against a local mock server.

use asc::cli::{Cli, RunContext};
use asc::client::{endpoints, AscClient, ListOptions, RequestContext, TokenSource};
use asc::config::{AscConfig, HttpConfig};
use asc::types::{AppsResponse, BetaTestersResponse};
use asc::ApiError;
use clap::Parser;
use httpmock::Method::{DELETE, GET};
use httpmock::MockServer;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &MockServer) -> AscClient {
    let http = HttpConfig {
        base_url: server.base_url(),
        ..HttpConfig::default()
    };
    AscClient::new(&http, TokenSource::static_token("test-token")).unwrap()
}

fn app_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "type": "apps",
        "id": id,
        "attributes": { "name": name, "bundleId": format!("com.example.{}", id), "sku": id }
    })
}

#[tokio::test]
async fn test_list_sends_bearer_and_limit() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/apps")
                .query_param("limit", "5")
                .header("authorization", "Bearer test-token");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "data": [app_json("1", "Weather")], "links": {} }));
        })
        .await;

    let client = client_for(&server);
    let apps: AppsResponse = client
        .list(
            &RequestContext::new(),
            &endpoints::apps(),
            &ListOptions {
                limit: Some(5),
                next: None,
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(apps.data.len(), 1);
    assert_eq!(apps.data[0].attributes.name, "Weather");
    assert_eq!(apps.data[0].attributes.bundle_id, "com.example.1");
}

#[tokio::test]
async fn test_list_all_follows_absolute_next_links() {
    let server = MockServer::start_async().await;
    let next = format!("{}/v1/apps?cursor=2", server.base_url());
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps").query_param("limit", "2");
            then.status(200).json_body(json!({
                "data": [app_json("1", "One"), app_json("2", "Two")],
                "links": { "self": "ignored", "next": next }
            }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps").query_param("cursor", "2");
            then.status(200).json_body(json!({
                "data": [app_json("3", "Three")],
                "links": {}
            }));
        })
        .await;

    let client = client_for(&server);
    let outcome = client
        .list_all::<AppsResponse>(
            &RequestContext::new(),
            &endpoints::apps(),
            &ListOptions {
                limit: Some(2),
                next: None,
            },
        )
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    let apps = outcome.into_result().unwrap();
    let ids: Vec<&str> = apps.data.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_next_link_to_foreign_host_is_refused() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps");
            then.status(200).json_body(json!({
                "data": [app_json("1", "One")],
                "links": { "next": "https://evil.example.com/v1/apps?cursor=2" }
            }));
        })
        .await;

    let client = client_for(&server);
    let outcome = client
        .list_all::<AppsResponse>(&RequestContext::new(), &endpoints::apps(), &ListOptions::default())
        .await
        .unwrap();

    let err = outcome.error.expect("foreign host should stop the walk");
    assert_eq!(err.page, 2);
    assert!(matches!(err.fetch_error(), Some(ApiError::DisallowedUrl { .. })));
    assert_eq!(outcome.value.data.len(), 1);
}

#[tokio::test]
async fn test_error_payload_is_decoded() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps/404");
            then.status(404).json_body(json!({
                "errors": [{
                    "status": "404",
                    "code": "NOT_FOUND",
                    "title": "The specified resource does not exist",
                    "detail": "There is no resource of type 'apps' with id '404'"
                }]
            }));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .get::<serde_json::Value>(&RequestContext::new(), &endpoints::app("404"))
        .await
        .unwrap_err();

    match err {
        ApiError::Status {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("NOT_FOUND"));
            assert!(message.starts_with("The specified resource does not exist"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps");
            then.status(200).body("not json");
        })
        .await;

    let client = client_for(&server);
    let err = client
        .get::<AppsResponse>(&RequestContext::new(), &endpoints::apps())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_delete_uses_delete_method() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1/webhooks/wh-1");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    client
        .delete(&RequestContext::new(), &endpoints::webhook("wh-1"))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps");
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;

    let ctx = RequestContext::new();
    ctx.cancel();
    let err = client_for(&server)
        .get::<AppsResponse>(&ctx, &endpoints::apps())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Cancelled));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_deadline_interrupts_slow_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({ "data": [] }));
        })
        .await;

    let ctx = RequestContext::with_timeout(Duration::from_millis(100));
    let err = client_for(&server)
        .get::<AppsResponse>(&ctx, &endpoints::apps())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DeadlineExceeded));
}

#[tokio::test]
async fn test_run_context_prints_table() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps");
            then.status(200).json_body(json!({
                "data": [app_json("1", "Weather")],
                "links": {}
            }));
        })
        .await;

    let cli = Cli::try_parse_from(["asc", "apps", "list", "--output", "table"]).unwrap();
    let context = RunContext::from_config(AscConfig::default()).with_client(client_for(&server));
    let mut out = Vec::new();
    context.execute(&cli.command, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Bundle ID"));
    assert!(text.contains("Weather"));
    assert!(text.contains("com.example.1"));
}

#[tokio::test]
async fn test_paginate_failure_still_prints_partial_result() {
    let server = MockServer::start_async().await;
    let next = format!("{}/v1/apps?cursor=2", server.base_url());
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps").query_param_exists("limit");
            then.status(200).json_body(json!({
                "data": [app_json("1", "One")],
                "links": { "next": next }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/apps").query_param("cursor", "2");
            then.status(500).json_body(json!({
                "errors": [{ "status": "500", "title": "Internal error" }]
            }));
        })
        .await;

    let cli = Cli::try_parse_from(["asc", "apps", "list", "--paginate", "--limit", "1"]).unwrap();
    let context = RunContext::from_config(AscConfig::default()).with_client(client_for(&server));
    let mut out = Vec::new();
    let err = context.execute(&cli.command, &mut out).await.unwrap_err();

    assert!(err.to_string().contains("page 2"));
    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_beta_tester_delete_by_email_looks_up_id() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/betaTesters")
                .query_param("filter[email]", "tester@example.com");
            then.status(200).json_body(json!({
                "data": [{
                    "type": "betaTesters",
                    "id": "bt-9",
                    "attributes": { "email": "tester@example.com" }
                }]
            }));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1/betaTesters/bt-9");
            then.status(204);
        })
        .await;

    let cli = Cli::try_parse_from([
        "asc",
        "beta-testers",
        "delete",
        "--email",
        "tester@example.com",
        "--confirm",
    ])
    .unwrap();
    let context = RunContext::from_config(AscConfig::default()).with_client(client_for(&server));
    let mut out = Vec::new();
    context.execute(&cli.command, &mut out).await.unwrap();

    lookup.assert_async().await;
    delete.assert_async().await;
    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed["id"], "bt-9");
    assert_eq!(printed["deleted"], true);
}

#[test]
fn test_beta_testers_response_tolerates_missing_attributes() {
    let parsed: BetaTestersResponse =
        serde_json::from_str(r#"{"data":[{"type":"betaTesters","id":"bt-1"}]}"#).unwrap();
    assert_eq!(parsed.data[0].attributes.email, "");
}
