use std::collections::BTreeMap;

use serde_json::Value;

use super::{
    asset_url, entry_slug, entry_uid, first_reference, first_string, number_field,
    reference_name, scalar_string, str_field,
};
use crate::pipeline::parse_price;
use crate::taxonomy::{self, group_taxonomies, TaxonomyLabels};
use crate::types::{Phone, Taxonomies};

const DEFAULT_BRAND: &str = "Unknown";
const DEFAULT_TYPE: &str = "Flagship";
const DEFAULT_OS: &str = "Android";

/// Recognized sub-fields per `full_specifications` block, mapped to flat spec keys.
/// The `other` block is merged wholesale.
const SPEC_GROUPS: &[(&str, &[(&str, &str)])] = &[
    (
        "display",
        &[
            ("size", "display"),
            ("type", "displayType"),
            ("resolution", "resolution"),
            ("refresh_rate", "refreshRate"),
            ("protection", "displayProtection"),
        ],
    ),
    (
        "performance",
        &[
            ("processor", "processor"),
            ("chipset", "processor"),
            ("ram", "ram"),
            ("storage", "storage"),
            ("gpu", "gpu"),
        ],
    ),
    (
        "camera",
        &[
            ("main", "camera"),
            ("rear", "camera"),
            ("main_camera", "camera"),
            ("front", "frontCamera"),
            ("selfie", "frontCamera"),
            ("ultrawide", "ultrawideCamera"),
            ("telephoto", "telephotoCamera"),
            ("video", "video"),
        ],
    ),
    (
        "battery",
        &[
            ("capacity", "battery"),
            ("charging", "charging"),
            ("wired_charging", "charging"),
            ("wireless", "wirelessCharging"),
            ("wireless_charging", "wirelessCharging"),
        ],
    ),
];

/// Top-level fallbacks used when the detailed blocks leave a gap.
const KEY_SPECS: &[&str] = &["display", "processor", "ram", "storage", "camera", "battery"];

pub fn normalize_phone(raw: &Value, labels: &TaxonomyLabels) -> Phone {
    let taxonomies = group_taxonomies(raw);

    let price = match raw.get("price") {
        Some(value) => scalar_string(value).unwrap_or_default(),
        None => String::new(),
    };
    let price_value = parse_price(&price);

    Phone {
        uid: entry_uid(raw),
        slug: entry_slug(raw),
        name: first_string(raw, &["title", "name"]).unwrap_or_default(),
        brand: resolve_brand(raw, &taxonomies, labels),
        price,
        price_value,
        image: asset_url(raw, "featured_image")
            .or_else(|| asset_url(raw, "image"))
            .or_else(|| asset_url(raw, "images")),
        rating: number_field(raw, "rating"),
        release_date: first_string(raw, &["release_date", "launch_date"]),
        phone_type: labels
            .first_label(&taxonomies, taxonomy::PHONE_TYPE)
            .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        os: labels
            .first_label(&taxonomies, taxonomy::OS)
            .unwrap_or_else(|| DEFAULT_OS.to_string()),
        description: first_string(raw, &["description", "summary"]),
        features: labels.all_labels(&taxonomies, taxonomy::FEATURES),
        specs: collect_specs(raw),
        taxonomies,
    }
}

/// Brand precedence: `brand` string, first `brand`/`company` reference, the
/// `company` taxonomy term, then "Unknown".
pub fn resolve_brand(raw: &Value, taxonomies: &Taxonomies, labels: &TaxonomyLabels) -> String {
    if let Some(brand) = str_field(raw, "brand") {
        return brand.to_string();
    }

    let referenced = ["brand", "company"]
        .iter()
        .filter_map(|key| first_reference(raw, key))
        .find_map(reference_name);
    if let Some(name) = referenced {
        return name;
    }

    labels
        .first_label(taxonomies, taxonomy::COMPANY)
        .unwrap_or_else(|| DEFAULT_BRAND.to_string())
}

/// Flatten `full_specifications` blocks into one spec map, then fill gaps from
/// `key_specifications`. The first value seen for a key wins.
pub fn collect_specs(raw: &Value) -> BTreeMap<String, String> {
    let mut specs = BTreeMap::new();

    if let Some(blocks) = raw.get("full_specifications").and_then(Value::as_array) {
        for block in blocks {
            let Some(groups) = block.as_object() else {
                continue;
            };
            for (group, fields) in groups {
                merge_group(&mut specs, group, fields);
            }
        }
    }

    if let Some(key_specs) = raw.get("key_specifications") {
        for key in KEY_SPECS {
            if let Some(value) = key_specs.get(*key).and_then(scalar_string) {
                specs.entry(key.to_string()).or_insert(value);
            }
        }
    }

    specs
}

fn merge_group(specs: &mut BTreeMap<String, String>, group: &str, fields: &Value) {
    let Some(fields) = fields.as_object() else {
        return;
    };

    if group == "other" {
        for (key, value) in fields {
            if let Some(value) = scalar_string(value) {
                specs.entry(camel_case(key)).or_insert(value);
            }
        }
        return;
    }

    let Some((_, mapping)) = SPEC_GROUPS.iter().find(|(name, _)| *name == group) else {
        return;
    };
    for (source, target) in mapping.iter() {
        if let Some(value) = fields.get(*source).and_then(scalar_string) {
            specs.entry(target.to_string()).or_insert(value);
        }
    }
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' || c == '-' || c == ' ' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
