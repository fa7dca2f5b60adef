use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use phonefront_common::fallback::static_companies;
use phonefront_common::normalize::CompanyRecord;
use phonefront_common::pipeline::{paginate, sort_companies, CompanySort, Pagination};
use phonefront_common::Company;

use super::{fetch, param, param_i64, personalized, variant_param, Params};
use crate::personalize::Personalization;
use crate::source::ContentType;
use crate::AppState;

const DEFAULT_PAGE_SIZE: u64 = 12;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompaniesResponse {
    pub items: Vec<Company>,
    pub page: u64,
    pub page_size: u64,
    pub total: usize,
    pub total_phones: u64,
    pub total_companies: usize,
    pub personalized: bool,
    pub variant_param: Option<String>,
}

/// `GET /api/companies?page&pageSize&sortBy`
///
/// Serves the static company list when the CMS fails or has no companies.
pub async fn api_companies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
    Personalization(selection): Personalization,
) -> Json<CompaniesResponse> {
    let pagination = Pagination::new(
        param_i64(&params, "page"),
        param_i64(&params, "pageSize"),
        DEFAULT_PAGE_SIZE,
    );
    let sort = CompanySort::from_param(param(&params, "sortBy"));

    let (companies, personalized, variant_param) =
        match fetch(&state, ContentType::Company, &selection).await {
            Ok(page) => {
                let companies: Vec<Company> = page
                    .entries
                    .into_iter()
                    .filter_map(CompanyRecord::classify)
                    .map(CompanyRecord::into_company)
                    .collect();
                if companies.is_empty() {
                    warn!("No readable companies returned, serving static data");
                    (static_companies(), false, None)
                } else {
                    let fetched = companies.len();
                    (
                        companies,
                        personalized(&selection, fetched),
                        variant_param(&selection),
                    )
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to load companies, serving static data");
                (static_companies(), false, None)
            }
        };

    let total = companies.len();
    let total_phones = companies.iter().map(|c| u64::from(c.phones_count)).sum();
    let items = paginate(sort_companies(companies, sort), pagination);

    Json(CompaniesResponse {
        items,
        page: pagination.page,
        page_size: pagination.page_size,
        total,
        total_phones,
        total_companies: total,
        personalized,
        variant_param,
    })
}
