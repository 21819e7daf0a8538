//! Integration tests for registration, adapters, and render dispatch.

use asc::output::{
    print_output, render_with_fallback, Headers, OutputFormat, OutputRegistry, RegistryKey,
    RenderFn, Renderable, Rows,
};
use asc::types::{
    AppAttributes, AppResponse, AppsResponse, Links, PreReleaseVersion,
    PreReleaseVersionAttributes, PreReleaseVersionResponse, PreReleaseVersionsResponse, Resource,
};
use asc::OutputError;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

#[derive(Serialize)]
struct Unregistered {
    #[serde(rename = "Value")]
    value: String,
}

struct Marker;

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default()
}

/// Dispatch `value` and collect every table the handler renders.
fn collect_tables<T: Renderable>(
    registry: &OutputRegistry,
    value: &T,
) -> (Vec<(Headers, Rows)>, String) {
    let mut tables = Vec::new();
    let mut fallback = Vec::new();
    {
        let mut capture = |headers: &[String], rows: &[Vec<String>]| {
            tables.push((headers.to_vec(), rows.to_vec()));
        };
        let render: &mut RenderFn<'_> = &mut capture;
        render_with_fallback(registry, Some(value as &dyn Renderable), render, &mut fallback).unwrap();
    }
    (tables, String::from_utf8(fallback).unwrap())
}

fn app_rows(response: &AppsResponse) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|app| vec![app.id.clone(), app.attributes.name.clone()])
        .collect();
    (vec!["ID".to_string(), "Name".to_string()], rows)
}

fn version_rows(response: &PreReleaseVersionsResponse) -> (Headers, Rows) {
    let rows = response
        .data
        .iter()
        .map(|v| vec![v.id.clone(), v.attributes.version.clone()])
        .collect();
    (vec!["ID".to_string(), "Version".to_string()], rows)
}

#[test]
fn test_rows_then_direct_for_same_type_panics() {
    let mut registry = OutputRegistry::new();
    registry.register_rows::<Marker, _>(|_| (vec!["A".to_string()], vec![]));

    let result = catch_unwind(AssertUnwindSafe(|| {
        registry.register_direct::<Marker, _>(|_, _| Ok(()));
    }));

    let message = panic_message(result.unwrap_err());
    assert!(message.contains("duplicate registration"), "{}", message);
    let key = RegistryKey::of::<Marker>();
    assert!(registry.contains_rows(&key));
    assert!(!registry.contains_direct(&key));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_multi_type_adapter_rolls_back_when_list_taken() {
    let mut registry = OutputRegistry::new();
    registry.register_rows::<AppResponse, _>(|_| (vec![], vec![]));

    let result = catch_unwind(AssertUnwindSafe(|| {
        registry.register_rows_with_single_resource_adapter::<AppAttributes, _>(app_rows);
    }));

    assert!(panic_message(result.unwrap_err()).contains("duplicate registration"));
    assert!(!registry.is_registered(&RegistryKey::of::<AppsResponse>()));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_dispatch_fallback_writes_json() {
    let registry = OutputRegistry::new();
    let value = Unregistered {
        value: "test".to_string(),
    };

    let (tables, fallback) = collect_tables(&registry, &value);

    assert!(tables.is_empty());
    assert!(fallback.contains("\"test\""));
    let parsed: serde_json::Value = serde_json::from_str(&fallback).unwrap();
    assert_eq!(parsed["Value"], "test");
}

#[test]
fn test_single_adapter_matches_list_rows() {
    let mut registry = OutputRegistry::new();
    registry.register_rows_with_single_resource_adapter::<AppAttributes, _>(app_rows);

    let app = Resource::new(
        "apps",
        "app-1",
        AppAttributes {
            name: "Weather".to_string(),
            ..AppAttributes::default()
        },
    );
    let single = AppResponse {
        data: app.clone(),
        links: Links::default(),
    };
    let list = AppsResponse::new(vec![app], Links::default());

    let (from_single, _) = collect_tables(&registry, &single);
    let (from_list, _) = collect_tables(&registry, &list);
    assert_eq!(from_single, from_list);
    assert_eq!(from_single, vec![app_rows(&list)]);
}

#[test]
fn test_single_to_list_adapter_matches_list_rows() {
    let mut registry = OutputRegistry::new();
    registry.register_rows_with_single_to_list_adapter::<
        PreReleaseVersionResponse,
        PreReleaseVersionsResponse,
        _,
    >(version_rows);

    let version = PreReleaseVersion::new(
        "preReleaseVersions",
        "prv-1",
        PreReleaseVersionAttributes {
            version: "1.2.0".to_string(),
            platform: "IOS".to_string(),
        },
    );
    let single = PreReleaseVersionResponse {
        data: version.clone(),
        links: Links::default(),
    };
    let list = PreReleaseVersionsResponse {
        data: vec![version],
        links: Links::default(),
    };

    let (tables, _) = collect_tables(&registry, &single);
    assert_eq!(tables, vec![version_rows(&list)]);
}

#[test]
fn test_failing_rows_handler_skips_render() {
    let mut registry = OutputRegistry::new();
    registry.register_rows_err::<AppsResponse, _>(|_| Err(OutputError::Handler("boom".to_string())));

    let mut rendered = 0;
    let mut fallback = Vec::new();
    let err = {
        let mut count = |_: &[String], _: &[Vec<String>]| rendered += 1;
        let render: &mut RenderFn<'_> = &mut count;
        render_with_fallback(
            &registry,
            Some(&AppsResponse::default() as &dyn Renderable),
            render,
            &mut fallback,
        )
        .unwrap_err()
    };

    assert_eq!(err.to_string(), "boom");
    assert_eq!(rendered, 0);
    assert!(fallback.is_empty());
}

#[test]
fn test_builtin_registry_renders_markdown_tables() {
    let apps = AppsResponse::new(
        vec![Resource::new(
            "apps",
            "1",
            AppAttributes {
                name: "Pipe | App".to_string(),
                bundle_id: "com.example.pipe".to_string(),
                ..AppAttributes::default()
            },
        )],
        Links::default(),
    );

    let mut out = Vec::new();
    print_output(&apps, OutputFormat::Markdown, false, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.starts_with("| ID | Name | Bundle ID |"));
    assert!(text.contains("Pipe \\| App"));
}

#[test]
fn test_builtin_registry_falls_back_to_json_for_tables() {
    let value = Unregistered {
        value: "plain".to_string(),
    };
    let mut out = Vec::new();
    print_output(&value, OutputFormat::Table, false, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"plain\""));
}
