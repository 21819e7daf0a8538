//! Cell formatting helpers shared by the row extractors.

use serde_json::Value;

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn compact_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Flatten an attribute object into `key=value` pairs sorted by key.
///
/// Strings are written bare; other values use their JSON form.
pub fn format_attribute_map(attributes: &Value) -> String {
    match attributes {
        Value::Object(map) => {
            let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            pairs
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, scalar_text(value)))
                .collect::<Vec<_>>()
                .join(", ")
        }
        Value::Null => String::new(),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

pub fn full_name(first: &str, last: &str) -> String {
    compact_whitespace(&format!("{} {}", first, last))
}

/// Escape a cell for a markdown table.
pub fn escape_markdown(cell: &str) -> String {
    cell.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
