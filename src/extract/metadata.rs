//! Structured metadata extraction from a parsed document
//!
//! Produces ordered `(bucket, value)` pairs:
//! - `<meta name="X" content="...">` → `meta_x` (nameless tags land in `meta_`)
//! - `<meta property="og:*" content="...">` → the property name verbatim
//! - `application/ld+json` scripts → `json_ld` entries of the form `key: value`

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;

/// Bucket receiving flattened JSON-LD fields
pub const JSON_LD_BUCKET: &str = "json_ld";

static META_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("meta").unwrap());

static OPEN_GRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property^="og:"]"#).unwrap());

static JSON_LD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

/// Extracts meta tag, Open Graph and JSON-LD metadata in document order
pub fn extract_metadata(document: &Html) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    meta_tags(document, &mut entries);
    open_graph_tags(document, &mut entries);
    json_ld_scripts(document, &mut entries);

    entries
}

fn meta_tags(document: &Html, entries: &mut Vec<(String, String)>) {
    for element in document.select(&META_SELECTOR) {
        let name = element.value().attr("name").unwrap_or("").trim();
        let content = element.value().attr("content").unwrap_or("");

        if content.is_empty() {
            continue;
        }

        entries.push((format!("meta_{}", name.to_lowercase()), content.to_string()));
    }
}

fn open_graph_tags(document: &Html, entries: &mut Vec<(String, String)>) {
    for element in document.select(&OPEN_GRAPH_SELECTOR) {
        let property = element.value().attr("property").unwrap_or("");
        let content = element.value().attr("content").unwrap_or("");

        if content.is_empty() {
            continue;
        }

        entries.push((property.to_string(), content.to_string()));
    }
}

fn json_ld_scripts(document: &Html, entries: &mut Vec<(String, String)>) {
    for script in document.select(&JSON_LD_SELECTOR) {
        let body: String = script.text().collect();
        match serde_json::from_str::<Value>(&body) {
            Ok(data) => flatten_json_ld(&data, entries),
            Err(e) => tracing::debug!("Skipping malformed JSON-LD block: {}", e),
        }
    }
}

/// Walks a JSON-LD value, recording string fields longer than two characters
///
/// Strings directly inside arrays have no key and are ignored.
pub fn flatten_json_ld(value: &Value, entries: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, field) in map {
                match field {
                    Value::String(s) if s.chars().count() > 2 => {
                        entries.push((JSON_LD_BUCKET.to_string(), format!("{}: {}", key, s)));
                    }
                    Value::Object(_) | Value::Array(_) => flatten_json_ld(field, entries),
                    _ => {}
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_json_ld(item, entries);
            }
        }
        _ => {}
    }
}
