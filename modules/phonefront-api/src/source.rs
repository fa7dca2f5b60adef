// EntrySource is the seam between the route handlers and the CMS.
//
// ContentstackClient is the production implementation; tests script their
// own sources. ContentHandle owns the lazily-built source for the process.

use std::sync::Arc;

use async_trait::async_trait;
use contentstack_client::{ContentstackClient, EntriesPage, StackConfig};
use tokio::sync::OnceCell;
use tracing::info;

use phonefront_common::{PhoneFrontError, Result};

/// Content types the API reads, with the reference fields each one resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Phone,
    Review,
    News,
    Company,
    PriceFilter,
}

impl ContentType {
    pub fn uid(&self) -> &'static str {
        match self {
            ContentType::Phone => "phone",
            ContentType::Review => "review",
            ContentType::News => "news",
            ContentType::Company => "company",
            ContentType::PriceFilter => "price_filter",
        }
    }

    pub fn include(&self) -> &'static [&'static str] {
        match self {
            ContentType::Phone => &["brand", "company"],
            ContentType::Review => &["author", "phone"],
            ContentType::News => &["author"],
            ContentType::Company => &["phones"],
            ContentType::PriceFilter => &[],
        }
    }
}

#[async_trait]
pub trait EntrySource: Send + Sync {
    /// All entries of a content type, optionally for a personalization variant.
    async fn fetch_entries(
        &self,
        content_type: ContentType,
        variant: Option<&str>,
    ) -> Result<EntriesPage>;
}

#[async_trait]
impl EntrySource for ContentstackClient {
    async fn fetch_entries(
        &self,
        content_type: ContentType,
        variant: Option<&str>,
    ) -> Result<EntriesPage> {
        Ok(ContentstackClient::fetch_entries(
            self,
            content_type.uid(),
            content_type.include(),
            variant,
        )
        .await?)
    }
}

/// Process-wide content source, built on first use.
///
/// Concurrent first requests share one initialization. A failed
/// initialization leaves the cell empty so the next request retries.
pub struct ContentHandle {
    source: OnceCell<Arc<dyn EntrySource>>,
    stack: Option<StackConfig>,
}

impl ContentHandle {
    pub fn lazy(stack: StackConfig) -> Self {
        Self {
            source: OnceCell::new(),
            stack: Some(stack),
        }
    }

    /// A handle around an already-built source.
    pub fn ready(source: Arc<dyn EntrySource>) -> Self {
        Self {
            source: OnceCell::new_with(Some(source)),
            stack: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.source.initialized()
    }

    pub async fn get(&self) -> Result<Arc<dyn EntrySource>> {
        self.source
            .get_or_try_init(|| async {
                let stack = self.stack.as_ref().ok_or_else(|| {
                    PhoneFrontError::Config("no content source configured".to_string())
                })?;
                let client = ContentstackClient::new(stack)?;
                info!(
                    region = %stack.region,
                    environment = %stack.environment,
                    "Content delivery client initialized"
                );
                Ok::<Arc<dyn EntrySource>, PhoneFrontError>(Arc::new(client))
            })
            .await
            .cloned()
    }
}
