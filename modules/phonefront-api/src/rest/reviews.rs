use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use phonefront_common::normalize::normalize_review;
use phonefront_common::pipeline::{
    filter_by_rating, filter_by_taxonomy, paginate, split_values, Pagination, RatingFilter,
};
use phonefront_common::{taxonomy, Review};

use super::{fetch, param, param_i64, personalized, variant_param, Params};
use crate::personalize::Personalization;
use crate::source::ContentType;
use crate::AppState;

const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsMeta {
    pub total: usize,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
    pub personalized: bool,
    pub variant_param: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponse {
    pub items: Vec<Review>,
    pub meta: ReviewsMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/reviews?phone&rating&page&limit`
///
/// `limit` is the page size here. A single `rating` is a minimum; a comma
/// list keeps reviews whose rating is one of the listed values.
pub async fn api_reviews(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
    Personalization(selection): Personalization,
) -> Json<ReviewsResponse> {
    let pagination = Pagination::new(
        param_i64(&params, "page"),
        param_i64(&params, "limit"),
        DEFAULT_LIMIT,
    );

    let page = match fetch(&state, ContentType::Review, &selection).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Failed to load reviews");
            return Json(ReviewsResponse {
                items: Vec::new(),
                meta: ReviewsMeta {
                    total: 0,
                    page: pagination.page,
                    limit: pagination.page_size,
                    pages: 0,
                    personalized: false,
                    variant_param: None,
                },
                error: Some("Failed to load reviews".to_string()),
            });
        }
    };

    let fetched = page.entries.len();
    let reviews: Vec<Review> = page.entries.iter().map(normalize_review).collect();

    let phone = split_values(param(&params, "phone"));
    let reviews = filter_by_taxonomy(reviews, taxonomy::PHONE, phone.as_ref());
    let rating = RatingFilter::parse(param(&params, "rating"));
    let reviews = filter_by_rating(reviews, rating.as_ref());

    let total = reviews.len();
    Json(ReviewsResponse {
        items: paginate(reviews, pagination),
        meta: ReviewsMeta {
            total,
            page: pagination.page,
            limit: pagination.page_size,
            pages: pagination.pages(total),
            personalized: personalized(&selection, fetched),
            variant_param: variant_param(&selection),
        },
        error: None,
    })
}
