use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{
    asset_url, bool_field, entry_slug, entry_uid, first_reference, first_string, reference_name,
};
use crate::dates::{parse_date, pretty_date};
use crate::taxonomy::{self, group_taxonomies, TaxonomyLabels};
use crate::types::NewsArticle;

const DEFAULT_CATEGORY: &str = "News";
const BREAKING_BADGE: &str = "BREAKING";

pub fn normalize_news(raw: &Value, labels: &TaxonomyLabels, now: DateTime<Utc>) -> NewsArticle {
    let taxonomies = group_taxonomies(raw);

    let publish_date = ["publish_date", "date", "published_at", "created_at"]
        .iter()
        .filter_map(|key| raw.get(*key).and_then(Value::as_str))
        .find_map(parse_date);

    let date_pretty = publish_date
        .map(|date| pretty_date(date, now))
        .unwrap_or_default();

    let is_breaking = bool_field(raw, "is_breaking") || bool_field(raw, "breaking");

    let author = first_string(raw, &["author"])
        .or_else(|| first_reference(raw, "author").and_then(reference_name));

    NewsArticle {
        uid: entry_uid(raw),
        slug: entry_slug(raw),
        title: first_string(raw, &["title"]).unwrap_or_default(),
        excerpt: first_string(raw, &["excerpt", "summary", "description"]),
        content: first_string(raw, &["content", "body"]),
        image: asset_url(raw, "featured_image").or_else(|| asset_url(raw, "image")),
        author,
        source: first_string(raw, &["source", "source_name"]),
        category: labels
            .first_label(&taxonomies, taxonomy::NEWS)
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        publish_date,
        date_pretty,
        is_breaking,
        badge: is_breaking.then(|| BREAKING_BADGE.to_string()),
        taxonomies,
    }
}
