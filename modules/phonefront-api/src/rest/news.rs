use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use phonefront_common::normalize::normalize_news;
use phonefront_common::pipeline::{filter_by_taxonomy, sort_news, split_values, NewsSort, Window};
use phonefront_common::taxonomy;
use phonefront_common::NewsArticle;

use super::{fetch, param, param_i64, personalized, variant_param, Params};
use crate::personalize::Personalization;
use crate::source::ContentType;
use crate::AppState;

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Category value that disables the category filter.
const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub items: Vec<NewsArticle>,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    pub personalized: bool,
    pub variant_param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/news?category&priority&source&company&sort&page&pageSize&limit`
pub async fn api_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
    Personalization(selection): Personalization,
) -> Json<NewsResponse> {
    let window = Window::from_params(
        param_i64(&params, "page"),
        param_i64(&params, "pageSize"),
        param_i64(&params, "limit"),
        DEFAULT_PAGE_SIZE,
    );
    let pagination = window.pagination();

    let page = match fetch(&state, ContentType::News, &selection).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Failed to load news");
            return Json(NewsResponse {
                items: Vec::new(),
                total: 0,
                page: pagination.map(|p| p.page),
                page_size: pagination.map(|p| p.page_size),
                personalized: false,
                variant_param: None,
                error: Some("Failed to load news".to_string()),
            });
        }
    };

    let fetched = page.entries.len();
    let now = Utc::now();
    let articles: Vec<NewsArticle> = page
        .entries
        .iter()
        .map(|raw| normalize_news(raw, &state.labels, now))
        .collect();

    let category = split_values(param(&params, "category"))
        .filter(|values| !values.contains(ALL_CATEGORIES));
    let priority = split_values(param(&params, "priority"));
    let source = split_values(param(&params, "source"));
    let company = split_values(param(&params, "company"));

    let articles = filter_by_taxonomy(articles, taxonomy::NEWS, category.as_ref());
    let articles = filter_by_taxonomy(articles, taxonomy::PRIORITY, priority.as_ref());
    let articles = filter_by_taxonomy(articles, taxonomy::SOURCE, source.as_ref());
    let articles = filter_by_taxonomy(articles, taxonomy::COMPANY, company.as_ref());
    let articles = sort_news(articles, NewsSort::from_param(param(&params, "sort")));

    let total = articles.len();
    let items = window.apply(articles);

    Json(NewsResponse {
        items,
        total,
        page: pagination.map(|p| p.page),
        page_size: pagination.map(|p| p.page_size),
        personalized: personalized(&selection, fetched),
        variant_param: variant_param(&selection),
        error: None,
    })
}
