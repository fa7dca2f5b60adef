use std::sync::Arc;

use axum::{extract::State, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use phonefront_common::normalize::normalize_price_filter;
use phonefront_common::PriceFilter;

use super::{fetch, personalized, variant_param};
use crate::personalize::Personalization;
use crate::source::ContentType;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFiltersResponse {
    pub items: Vec<PriceFilter>,
    pub total: usize,
    pub personalized: bool,
    pub variant_param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl PriceFiltersResponse {
    fn empty(message: &str) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            personalized: false,
            variant_param: None,
            message: Some(message.to_string()),
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }
}

/// `GET /api/price-filters`
///
/// Filters come back ordered by lower bound.
pub async fn api_price_filters(
    State(state): State<Arc<AppState>>,
    Personalization(selection): Personalization,
) -> Json<PriceFiltersResponse> {
    let page = match fetch(&state, ContentType::PriceFilter, &selection).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Failed to load price filters");
            return Json(PriceFiltersResponse::empty("Failed to load price filters"));
        }
    };

    if page.entries.is_empty() {
        return Json(PriceFiltersResponse {
            personalized: personalized(&selection, 0),
            variant_param: variant_param(&selection),
            ..PriceFiltersResponse::empty("No price filters found")
        });
    }

    let fetched = page.entries.len();
    let mut items: Vec<PriceFilter> = page.entries.iter().map(normalize_price_filter).collect();
    items.sort_by(|a, b| a.min_price.total_cmp(&b.min_price));

    Json(PriceFiltersResponse {
        total: items.len(),
        items,
        personalized: personalized(&selection, fetched),
        variant_param: variant_param(&selection),
        message: None,
        timestamp: None,
    })
}
