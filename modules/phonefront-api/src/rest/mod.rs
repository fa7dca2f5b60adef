pub mod companies;
pub mod news;
pub mod phones;
pub mod price_filters;
pub mod reviews;

use std::collections::HashMap;

use contentstack_client::EntriesPage;
use phonefront_common::{Result, VariantSelection};

use crate::source::ContentType;
use crate::AppState;

pub type Params = HashMap<String, String>;

// --- Helpers ---

/// Non-empty, trimmed query param.
fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Integer query param; unparseable values count as absent.
fn param_i64(params: &Params, key: &str) -> Option<i64> {
    param(params, key).and_then(|v| v.parse().ok())
}

fn param_f64(params: &Params, key: &str) -> Option<f64> {
    param(params, key)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// One content fetch for the request, through the process-wide source.
async fn fetch(
    state: &AppState,
    content_type: ContentType,
    selection: &VariantSelection,
) -> Result<EntriesPage> {
    let source = state.content.get().await?;
    source
        .fetch_entries(content_type, selection.variant_id())
        .await
}

/// Personalization is only claimed when a variant was requested and the CMS
/// actually returned entries for it.
fn personalized(selection: &VariantSelection, fetched: usize) -> bool {
    selection.personalized() && fetched > 0
}

fn variant_param(selection: &VariantSelection) -> Option<String> {
    selection.variant_id().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn lenient_param_parsing() {
        let p = params(&[("page", "2"), ("pageSize", "ten"), ("priceMin", "NaN"), ("q", "  ")]);
        assert_eq!(param_i64(&p, "page"), Some(2));
        assert_eq!(param_i64(&p, "pageSize"), None);
        assert_eq!(param_f64(&p, "priceMin"), None);
        assert_eq!(param(&p, "q"), None);
    }

    #[test]
    fn personalized_requires_variant_and_entries() {
        let variant = VariantSelection::new("exp_1");
        assert!(personalized(&variant, 3));
        assert!(!personalized(&variant, 0));
        assert!(!personalized(&VariantSelection::none(), 3));
    }
}
