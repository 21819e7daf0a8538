//! End-to-end tests that run the `asc` binary against a mock server.

use httpmock::Method::GET;
use httpmock::MockServer;
use serde_json::json;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ASC_VARS: &[&str] = &[
    "ASC_CONFIG_PATH",
    "ASC_KEY_ID",
    "ASC_ISSUER_ID",
    "ASC_PRIVATE_KEY_PATH",
    "ASC_PRIVATE_KEY",
    "ASC_BEARER_TOKEN",
    "ASC_PROFILE",
    "ASC_BASE_URL",
    "ASC_DEFAULT_OUTPUT",
    "ASC_TIMEOUT",
    "ASC_DEBUG",
    "ASC_LOG",
    "ASC_APP_ID",
];

/// Command with an isolated home and config directory and no inherited ASC_* settings.
fn asc(home: &Path, base_url: Option<&str>) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_asc"));
    for var in ASC_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    if let Some(url) = base_url {
        cmd.env("ASC_BASE_URL", url)
            .env("ASC_BEARER_TOKEN", "integration-token");
    }
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn apps_body(ids: &[&str], next: Option<String>) -> serde_json::Value {
    let data: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "type": "apps",
                "id": id,
                "attributes": { "name": format!("App {}", id), "bundleId": format!("com.example.{}", id) }
            })
        })
        .collect();
    match next {
        Some(next) => json!({ "data": data, "links": { "next": next } }),
        None => json!({ "data": data, "links": {} }),
    }
}

#[test]
fn test_apps_list_table_output() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/apps")
            .header("authorization", "Bearer integration-token");
        then.status(200).json_body(apps_body(&["1", "2"], None));
    });

    let output = asc(home.path(), Some(&server.base_url()))
        .args(["apps", "list", "-o", "table"])
        .output()
        .unwrap();

    mock.assert();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Bundle ID"));
    assert!(text.contains("com.example.2"));
}

#[test]
fn test_json_is_the_default_format() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/apps");
        then.status(200).json_body(apps_body(&["7"], None));
    });

    let output = asc(home.path(), Some(&server.base_url()))
        .args(["apps", "list"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["data"][0]["id"], "7");
}

#[test]
fn test_pretty_with_table_is_rejected_before_any_request() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/apps");
        then.status(200).json_body(apps_body(&[], None));
    });

    let output = asc(home.path(), Some(&server.base_url()))
        .args(["apps", "list", "--output", "table", "--pretty"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--pretty is only valid with JSON output"));
    assert_eq!(mock.hits(), 0);
}

#[test]
fn test_paginate_failure_prints_partial_result_and_warns() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let next = server.url("/v1/apps?cursor=2");
    server.mock(|when, then| {
        when.method(GET).path("/v1/apps").query_param("limit", "2");
        then.status(200).json_body(apps_body(&["1", "2"], Some(next)));
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/apps").query_param("cursor", "2");
        then.status(503).body("Service Unavailable");
    });

    let output = asc(home.path(), Some(&server.base_url()))
        .args(["apps", "list", "--paginate", "--limit", "2"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["data"].as_array().map(Vec::len), Some(2));
    let err = stderr(&output);
    assert!(err.contains("pagination stopped early"), "stderr: {}", err);
    assert!(err.contains("page 2"), "stderr: {}", err);
}

#[test]
fn test_missing_credentials_is_reported() {
    let home = TempDir::new().unwrap();

    let output = asc(home.path(), None).args(["apps", "list"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error:"));
}

#[test]
fn test_config_show_masks_secrets() {
    let home = TempDir::new().unwrap();

    let output = asc(home.path(), Some("https://api.appstoreconnect.apple.com/"))
        .args(["config", "show"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(!text.contains("integration-token"));
    assert!(text.contains("********"));
}

#[test]
fn test_config_init_writes_template_once() {
    let home = TempDir::new().unwrap();
    let target = home.path().join("asc.toml");

    let first = asc(home.path(), None)
        .args(["config", "init", "--path"])
        .arg(&target)
        .output()
        .unwrap();
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert!(stdout(&first).contains("Wrote"));
    assert!(std::fs::read_to_string(&target).unwrap().contains("[auth]"));

    let second = asc(home.path(), None)
        .args(["config", "init", "--path"])
        .arg(&target)
        .output()
        .unwrap();
    assert_eq!(second.status.code(), Some(1));

    let forced = asc(home.path(), None)
        .args(["config", "init", "--force", "--path"])
        .arg(&target)
        .output()
        .unwrap();
    assert!(forced.status.success());
}
