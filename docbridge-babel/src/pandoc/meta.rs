//! Document metadata in pandoc's `meta` slot.
//!
//! Metadata is packed as a `MetaMap` under [`META_KEY`](super::META_KEY). Fidelity is
//! best-effort: numbers are written as `MetaString` and read back as strings, `MetaInlines`
//! and `MetaBlocks` written by pandoc itself are flattened to plain text.

use serde_json::{json, Map, Value};

/// Keys never written to the meta slot
const EXCLUDED_KEYS: &[&str] = &["resources"];

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Pack metadata into a `MetaMap`, `None` when nothing is left to write.
pub fn pack(metadata: &Map<String, Value>) -> Option<Value> {
    let entries: Map<String, Value> = metadata
        .iter()
        .filter(|(key, value)| !EXCLUDED_KEYS.contains(&key.as_str()) && !is_empty(value))
        .filter_map(|(key, value)| pack_value(value).map(|packed| (key.clone(), packed)))
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(json!({"t": "MetaMap", "c": entries}))
    }
}

fn pack_value(value: &Value) -> Option<Value> {
    Some(match value {
        Value::Null => return None,
        Value::Bool(b) => json!({"t": "MetaBool", "c": b}),
        Value::Number(n) => json!({"t": "MetaString", "c": n.to_string()}),
        Value::String(s) => json!({"t": "MetaString", "c": s}),
        Value::Array(items) => {
            let packed: Vec<Value> = items.iter().filter_map(pack_value).collect();
            json!({"t": "MetaList", "c": packed})
        }
        Value::Object(map) => {
            let packed: Map<String, Value> = map
                .iter()
                .filter_map(|(key, value)| pack_value(value).map(|packed| (key.clone(), packed)))
                .collect();
            json!({"t": "MetaMap", "c": packed})
        }
    })
}

/// Turn a meta value back into plain JSON.
pub fn unpack(value: &Value) -> Value {
    let tag = value.get("t").and_then(Value::as_str).unwrap_or("");
    let content = value.get("c").unwrap_or(&Value::Null);
    match tag {
        "MetaBool" => Value::Bool(content.as_bool().unwrap_or(false)),
        "MetaString" => Value::String(content.as_str().unwrap_or("").to_string()),
        "MetaList" => Value::Array(
            content
                .as_array()
                .map(|items| items.iter().map(unpack).collect())
                .unwrap_or_default(),
        ),
        "MetaMap" => Value::Object(unpack_map(content)),
        "MetaInlines" => Value::String(stringify(content)),
        "MetaBlocks" => {
            let blocks = content.as_array().map(Vec::as_slice).unwrap_or(&[]);
            let paragraphs: Vec<String> = blocks.iter().map(stringify).collect();
            Value::String(paragraphs.join("\n"))
        }
        _ => Value::Null,
    }
}

/// Unpack the entries of a `MetaMap` payload or a top-level `meta` object.
pub fn unpack_map(entries: &Value) -> Map<String, Value> {
    entries
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(key, value)| (key.clone(), unpack(value)))
                .filter(|(_, value)| !value.is_null())
                .collect()
        })
        .unwrap_or_default()
}

/// Plain text of any pandoc element or element list
pub fn stringify(value: &Value) -> String {
    let mut out = String::new();
    collect_text(value, &mut out);
    out
}

fn collect_text(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_text(item, out)),
        Value::Object(map) => match map.get("t").and_then(Value::as_str) {
            Some("Str") => out.push_str(map.get("c").and_then(Value::as_str).unwrap_or("")),
            Some("Space") | Some("SoftBreak") | Some("LineBreak") => out.push(' '),
            Some("Code") | Some("Math") | Some("RawInline") => {
                if let Some(text) = map.get("c").and_then(|c| c.get(1)).and_then(Value::as_str) {
                    out.push_str(text);
                }
            }
            _ => {
                if let Some(content) = map.get("c") {
                    collect_text(content, out);
                }
            }
        },
        _ => {}
    }
}
