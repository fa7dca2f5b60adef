pub mod error;
pub mod types;

pub use error::{ContentstackError, Result};
pub use types::{EntriesPage, EntriesResponse, Region, StackConfig};

/// Header carrying the personalization variant aliases for a delivery request.
pub const VARIANT_HEADER: &str = "x-cs-variant-uid";

/// Prefix the delivery API expects on every personalization variant alias.
pub const VARIANT_ALIAS_PREFIX: &str = "cs_personalize_";

/// Maximum entries per delivery request.
const PAGE_LIMIT: u64 = 100;

/// Hard stop for paging through a single content type.
const MAX_PAGES: u64 = 10;

/// Convert a variant param (`exp_var` pairs, comma separated) into delivery aliases.
pub fn variant_aliases(variant_param: &str) -> Vec<String> {
    variant_param
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.starts_with(VARIANT_ALIAS_PREFIX) {
                s.to_string()
            } else {
                format!("{VARIANT_ALIAS_PREFIX}{s}")
            }
        })
        .collect()
}

pub struct ContentstackClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    delivery_token: String,
    environment: String,
    locale: String,
}

impl ContentstackClient {
    pub fn new(config: &StackConfig) -> Result<Self> {
        if config.api_key.is_empty() || config.delivery_token.is_empty() {
            return Err(ContentstackError::Config(
                "api key and delivery token are required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ContentstackError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            api_key: config.api_key.clone(),
            delivery_token: config.delivery_token.clone(),
            environment: config.environment.clone(),
            locale: config.locale.clone(),
        })
    }

    pub fn entries_url(&self, content_type: &str) -> String {
        format!("{}/v3/content_types/{}/entries", self.base_url, content_type)
    }

    /// Fetch every published entry of a content type, following `skip` pages.
    ///
    /// `include` lists reference fields to resolve inline. `variant` is the raw
    /// variant param; it is turned into aliases and sent in [`VARIANT_HEADER`].
    pub async fn fetch_entries(
        &self,
        content_type: &str,
        include: &[&str],
        variant: Option<&str>,
    ) -> Result<EntriesPage> {
        let aliases = variant.map(variant_aliases).unwrap_or_default();
        let mut collected = EntriesPage::default();

        for page in 0..MAX_PAGES {
            let resp = self
                .entries_page(content_type, include, &aliases, page * PAGE_LIMIT)
                .await?;
            let fetched = resp.entries.len() as u64;
            collected.entries.extend(resp.entries);

            match resp.count {
                Some(count) => {
                    collected.count = count;
                    if fetched == 0 || collected.entries.len() as u64 >= count {
                        break;
                    }
                }
                None => {
                    collected.count = collected.entries.len() as u64;
                    if fetched < PAGE_LIMIT {
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            content_type,
            variants = aliases.len(),
            fetched = collected.entries.len(),
            count = collected.count,
            "Fetched entries"
        );

        Ok(collected)
    }

    async fn entries_page(
        &self,
        content_type: &str,
        include: &[&str],
        aliases: &[String],
        skip: u64,
    ) -> Result<EntriesResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("environment", self.environment.clone()),
            ("locale", self.locale.clone()),
            ("include_count", "true".to_string()),
            ("limit", PAGE_LIMIT.to_string()),
            ("skip", skip.to_string()),
        ];
        for field in include {
            query.push(("include[]", field.to_string()));
        }

        let mut req = self
            .client
            .get(self.entries_url(content_type))
            .header("api_key", &self.api_key)
            .header("access_token", &self.delivery_token)
            .query(&query);
        if !aliases.is_empty() {
            req = req.header(VARIANT_HEADER, aliases.join(","));
        }

        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ContentstackError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
