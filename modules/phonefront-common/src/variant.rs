//! Personalization variant selection for a single request.
//!
//! Sources are checked in a fixed order and the first usable one wins:
//! the `cs_personalize` query param, the `cs_variant` query param, then the
//! first active experiment in the `cs-personalize-manifest` cookie.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

pub const PERSONALIZE_PARAM: &str = "cs_personalize";
pub const VARIANT_PARAM: &str = "cs_variant";
pub const MANIFEST_COOKIE: &str = "cs-personalize-manifest";

/// Marker the edge middleware writes when no variant was assigned.
const PLACEHOLDER: &str = "_null";

/// The variant chosen for a request. `personalized()` is true exactly when a
/// variant id is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelection {
    variant_id: Option<String>,
}

impl VariantSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(variant_id: impl Into<String>) -> Self {
        Self {
            variant_id: Some(variant_id.into()),
        }
    }

    pub fn variant_id(&self) -> Option<&str> {
        self.variant_id.as_deref()
    }

    pub fn personalized(&self) -> bool {
        self.variant_id.is_some()
    }
}

#[derive(Deserialize)]
struct Manifest {
    #[serde(rename = "activeVariants", default)]
    active_variants: Map<String, Value>,
}

/// Resolve the request's variant from its query params and `Cookie` header.
pub fn resolve_variant(
    query: &HashMap<String, String>,
    cookie_header: Option<&str>,
) -> VariantSelection {
    if let Some(value) = usable_param(query.get(PERSONALIZE_PARAM)) {
        return VariantSelection::new(value);
    }
    if let Some(value) = usable_param(query.get(VARIANT_PARAM)) {
        return VariantSelection::new(value);
    }

    cookie_header
        .and_then(|header| parse_cookie(header, MANIFEST_COOKIE))
        .and_then(variant_from_manifest)
        .map(VariantSelection::new)
        .unwrap_or_default()
}

fn usable_param(value: Option<&String>) -> Option<&str> {
    let value = value?.trim();
    if value.is_empty() || value.contains(PLACEHOLDER) {
        return None;
    }
    Some(value)
}

/// Parse a specific cookie from the Cookie header string.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                return Some(value);
            }
        }
    }
    None
}

/// Synthesize `{experiment}_{variant}` from the first active experiment in a
/// URL-encoded manifest. Any decoding problem means "no variant".
pub fn variant_from_manifest(raw: &str) -> Option<String> {
    let raw = raw.trim().trim_matches('"');
    if raw.is_empty() {
        return None;
    }

    let decoded = match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!(error = %e, "Manifest cookie is not valid percent-encoding");
            return None;
        }
    };

    let manifest: Manifest = match serde_json::from_str(&decoded) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!(error = %e, "Manifest cookie is not valid JSON");
            return None;
        }
    };

    manifest
        .active_variants
        .iter()
        .find_map(|(experiment, variant)| match variant {
            Value::String(v) if !v.is_empty() => Some(format!("{experiment}_{v}")),
            Value::Number(n) => Some(format!("{experiment}_{n}")),
            _ => None,
        })
}
