use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use phonefront_common::normalize::normalize_phone;
use phonefront_common::pipeline::{
    filter_by_price, filter_by_taxonomy, paginate, parse_price_ranges, sort_phones, split_values,
    Pagination, PhoneSort,
};
use phonefront_common::{taxonomy, Phone, VariantSelection};

use super::{fetch, param, param_f64, param_i64, personalized, variant_param, Params};
use crate::personalize::Personalization;
use crate::source::ContentType;
use crate::AppState;

const DEFAULT_PAGE_SIZE: u64 = 12;

/// Query param → taxonomy uid for the term filters, applied in this order.
const TAXONOMY_FILTERS: &[(&str, &str)] = &[
    ("companies", taxonomy::COMPANY),
    ("os", taxonomy::OS),
    ("features", taxonomy::FEATURES),
    ("screenType", taxonomy::SCREEN_TYPE),
    ("phoneType", taxonomy::PHONE_TYPE),
    ("releaseStatus", taxonomy::RELEASE_STATUS),
];

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonesResponse {
    pub items: Vec<Phone>,
    pub page: u64,
    pub page_size: u64,
    pub total: usize,
    pub personalized: bool,
    pub variant_param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneDetailResponse {
    pub phone: Option<Phone>,
    pub personalized: bool,
    pub variant_param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/phones?page&pageSize&sortBy&slug&companies&os&features&screenType&phoneType&releaseStatus&priceMin&priceMax&priceRange`
///
/// With `slug`, answers a single phone (404 when no entry has that slug).
pub async fn api_phones(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
    Personalization(selection): Personalization,
) -> Response {
    match param(&params, "slug") {
        Some(slug) => phone_detail(&state, slug, &selection).await,
        None => phone_list(&state, &params, &selection).await.into_response(),
    }
}

async fn phone_list(
    state: &AppState,
    params: &Params,
    selection: &VariantSelection,
) -> Json<PhonesResponse> {
    let pagination = Pagination::new(
        param_i64(params, "page"),
        param_i64(params, "pageSize"),
        DEFAULT_PAGE_SIZE,
    );

    let page = match fetch(state, ContentType::Phone, selection).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Failed to load phones");
            return Json(PhonesResponse {
                items: Vec::new(),
                page: pagination.page,
                page_size: pagination.page_size,
                total: 0,
                personalized: false,
                variant_param: None,
                error: Some("Failed to load phones".to_string()),
            });
        }
    };

    let fetched = page.entries.len();
    let mut phones: Vec<Phone> = page
        .entries
        .iter()
        .map(|raw| normalize_phone(raw, &state.labels))
        .collect();

    for (key, taxonomy) in TAXONOMY_FILTERS {
        let values = split_values(param(params, key));
        phones = filter_by_taxonomy(phones, taxonomy, values.as_ref());
    }

    let ranges = parse_price_ranges(param(params, "priceRange"));
    let phones = filter_by_price(
        phones,
        param_f64(params, "priceMin"),
        param_f64(params, "priceMax"),
        &ranges,
    );
    let phones = sort_phones(phones, PhoneSort::from_param(param(params, "sortBy")));

    let total = phones.len();
    debug!(fetched, total, "Filtered phones");

    Json(PhonesResponse {
        items: paginate(phones, pagination),
        page: pagination.page,
        page_size: pagination.page_size,
        total,
        personalized: personalized(selection, fetched),
        variant_param: variant_param(selection),
        error: None,
    })
}

async fn phone_detail(state: &AppState, slug: &str, selection: &VariantSelection) -> Response {
    let page = match fetch(state, ContentType::Phone, selection).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, slug, "Failed to load phone");
            return Json(PhoneDetailResponse {
                phone: None,
                personalized: false,
                variant_param: None,
                error: Some("Failed to load phone".to_string()),
            })
            .into_response();
        }
    };

    let fetched = page.entries.len();
    let phone = page
        .entries
        .iter()
        .map(|raw| normalize_phone(raw, &state.labels))
        .find(|phone| phone.slug.eq_ignore_ascii_case(slug) || phone.uid == slug);

    match phone {
        Some(phone) => Json(PhoneDetailResponse {
            phone: Some(phone),
            personalized: personalized(selection, fetched),
            variant_param: variant_param(selection),
            error: None,
        })
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(PhoneDetailResponse {
                phone: None,
                personalized: false,
                variant_param: None,
                error: Some("Phone not found".to_string()),
            }),
        )
            .into_response(),
    }
}
