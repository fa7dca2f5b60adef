//! Reshape raw CMS entries into the stable per-content-type output types.
//!
//! Normalizers are total: missing or oddly-typed fields fall back to defaults
//! rather than failing the entry.

mod company;
mod news;
mod phone;
mod price_filter;
mod review;

pub use company::{normalize_company, CompanyRecord};
pub use news::normalize_news;
pub use phone::{collect_specs, normalize_phone, resolve_brand};
pub use price_filter::{normalize_price_filter, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
pub use review::normalize_review;

use serde_json::Value;
use tracing::debug;

/// Non-empty, trimmed string field.
pub(crate) fn str_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub(crate) fn string_field(raw: &Value, key: &str) -> Option<String> {
    str_field(raw, key).map(String::from)
}

/// First of several keys holding a non-empty string.
pub(crate) fn first_string(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| string_field(raw, key))
}

/// Scalar rendered as text: strings as-is, numbers and booleans formatted.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Number stored either as a JSON number or a numeric string.
pub(crate) fn number_field(raw: &Value, key: &str) -> Option<f64> {
    match raw.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn bool_field(raw: &Value, key: &str) -> bool {
    match raw.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// First element of a reference array, if the field is a non-empty array.
pub(crate) fn first_reference<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key)?.as_array()?.first()
}

/// Display name of a referenced entry: `title`, then `name`.
pub(crate) fn reference_name(reference: &Value) -> Option<String> {
    first_string(reference, &["title", "name"])
}

/// `url` of an asset field, whether it is an object or an array of objects.
pub(crate) fn asset_url(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::Object(_) => str_field(&raw[key], "url").map(String::from),
        Value::Array(items) => items
            .iter()
            .find_map(|item| str_field(item, "url").map(String::from)),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Array of strings, or a newline-separated string, as a list.
pub(crate) fn string_list(raw: &Value, key: &str) -> Vec<String> {
    match raw.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(Value::String(s)) => s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn entry_uid(raw: &Value) -> String {
    match str_field(raw, "uid") {
        Some(uid) => uid.to_string(),
        None => {
            debug!("Entry without a uid");
            String::new()
        }
    }
}

/// `slug` field, else the last path segment of `url`, else the uid.
pub(crate) fn entry_slug(raw: &Value) -> String {
    if let Some(slug) = str_field(raw, "slug") {
        return slug.to_string();
    }
    if let Some(segment) = str_field(raw, "url").and_then(|url| {
        url.trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
    }) {
        return segment.to_string();
    }
    entry_uid(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slug_precedence() {
        assert_eq!(entry_slug(&json!({"slug": "a", "url": "/phones/b", "uid": "c"})), "a");
        assert_eq!(entry_slug(&json!({"url": "/phones/b/", "uid": "c"})), "b");
        assert_eq!(entry_slug(&json!({"url": "/", "uid": "c"})), "c");
    }

    #[test]
    fn asset_url_shapes() {
        assert_eq!(asset_url(&json!({"img": {"url": "u1"}}), "img").as_deref(), Some("u1"));
        assert_eq!(asset_url(&json!({"img": [{}, {"url": "u2"}]}), "img").as_deref(), Some("u2"));
        assert_eq!(asset_url(&json!({"img": null}), "img"), None);
    }

    #[test]
    fn numbers_from_strings() {
        assert_eq!(number_field(&json!({"n": "4.5"}), "n"), Some(4.5));
        assert_eq!(number_field(&json!({"n": 3}), "n"), Some(3.0));
        assert_eq!(number_field(&json!({"n": "abc"}), "n"), None);
    }

    #[test]
    fn lists_from_text() {
        assert_eq!(string_list(&json!({"p": "Fast\n\n Bright "}), "p"), vec!["Fast", "Bright"]);
        assert_eq!(string_list(&json!({"p": ["a", 1]}), "p"), vec!["a", "1"]);
    }
}
