use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ContentstackError;

/// Hosting region of a stack. Each region has its own delivery CDN host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Us,
    Eu,
    AzureNa,
    AzureEu,
    GcpNa,
}

impl Region {
    pub fn delivery_host(&self) -> &'static str {
        match self {
            Region::Us => "cdn.contentstack.io",
            Region::Eu => "eu-cdn.contentstack.com",
            Region::AzureNa => "azure-na-cdn.contentstack.com",
            Region::AzureEu => "azure-eu-cdn.contentstack.com",
            Region::GcpNa => "gcp-na-cdn.contentstack.com",
        }
    }
}

impl FromStr for Region {
    type Err = ContentstackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "us" | "na" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            "azure-na" | "azure_na" => Ok(Region::AzureNa),
            "azure-eu" | "azure_eu" => Ok(Region::AzureEu),
            "gcp-na" | "gcp_na" => Ok(Region::GcpNa),
            other => Err(ContentstackError::Config(format!("unknown region: {other}"))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::Us => "us",
            Region::Eu => "eu",
            Region::AzureNa => "azure-na",
            Region::AzureEu => "azure-eu",
            Region::GcpNa => "gcp-na",
        };
        f.write_str(s)
    }
}

/// Connection settings for one stack environment.
#[derive(Debug, Clone)]
pub struct StackConfig {
    pub api_key: String,
    pub delivery_token: String,
    pub environment: String,
    pub region: Region,
    /// Overrides the region's CDN host (e.g. a proxy or a custom domain).
    pub host: Option<String>,
    pub locale: String,
    pub timeout: Duration,
}

impl StackConfig {
    /// Base URL including scheme, without trailing slash.
    pub fn base_url(&self) -> String {
        match &self.host {
            Some(host) if host.starts_with("http://") || host.starts_with("https://") => {
                host.trim_end_matches('/').to_string()
            }
            Some(host) => format!("https://{}", host.trim_end_matches('/')),
            None => format!("https://{}", self.region.delivery_host()),
        }
    }
}

/// Raw body of `GET /v3/content_types/{uid}/entries`.
#[derive(Debug, Clone, Deserialize)]
pub struct EntriesResponse {
    #[serde(default)]
    pub entries: Vec<Value>,
    pub count: Option<u64>,
}

/// All entries collected for one content type, across delivery pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntriesPage {
    pub entries: Vec<Value>,
    pub count: u64,
}
