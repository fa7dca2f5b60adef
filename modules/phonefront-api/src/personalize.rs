use std::collections::HashMap;
use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts},
};

use phonefront_common::{resolve_variant, VariantSelection};

/// The request's personalization variant. Extraction never fails: missing or
/// malformed signals resolve to "no variant".
pub struct Personalization(pub VariantSelection);

impl<S> FromRequestParts<S> for Personalization
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query: HashMap<String, String> = Query::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        // HTTP/2 clients may split cookies across several headers.
        let cookies: Vec<&str> = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        let cookie_header = (!cookies.is_empty()).then(|| cookies.join("; "));

        Ok(Personalization(resolve_variant(
            &query,
            cookie_header.as_deref(),
        )))
    }
}
