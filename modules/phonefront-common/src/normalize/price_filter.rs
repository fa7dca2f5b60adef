use serde_json::Value;

use super::{entry_slug, entry_uid, first_string, number_field};
use crate::types::PriceFilter;

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 2000.0;

pub fn normalize_price_filter(raw: &Value) -> PriceFilter {
    PriceFilter {
        uid: entry_uid(raw),
        slug: entry_slug(raw),
        label: first_string(raw, &["title", "label"]).unwrap_or_default(),
        min_price: number_field(raw, "min_price").unwrap_or(DEFAULT_MIN_PRICE),
        max_price: number_field(raw, "max_price").unwrap_or(DEFAULT_MAX_PRICE),
    }
}
