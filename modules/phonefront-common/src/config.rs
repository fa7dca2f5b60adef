use std::env;
use std::time::Duration;

use contentstack_client::{Region, StackConfig};

use crate::error::{PhoneFrontError, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Contentstack
    pub contentstack_api_key: String,
    pub contentstack_delivery_token: String,
    pub contentstack_environment: String,
    pub contentstack_region: String,
    pub contentstack_host: Option<String>,
    pub contentstack_locale: String,
    pub contentstack_timeout_secs: u64,

    // Taxonomy labels override (JSON file)
    pub taxonomy_labels_path: Option<String>,

    // Web server
    pub api_host: String,
    pub api_port: u16,

    // CORS
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            contentstack_api_key: required_env("CONTENTSTACK_API_KEY")?,
            contentstack_delivery_token: required_env("CONTENTSTACK_DELIVERY_TOKEN")?,
            contentstack_environment: required_env("CONTENTSTACK_ENVIRONMENT")?,
            contentstack_region: env::var("CONTENTSTACK_REGION").unwrap_or_else(|_| "us".to_string()),
            contentstack_host: optional_env("CONTENTSTACK_HOST"),
            contentstack_locale: env::var("CONTENTSTACK_LOCALE")
                .unwrap_or_else(|_| "en-us".to_string()),
            contentstack_timeout_secs: parse_env("CONTENTSTACK_TIMEOUT_SECS", 10)?,
            taxonomy_labels_path: optional_env("TAXONOMY_LABELS_PATH"),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: parse_env("API_PORT", 3000)?,
            allowed_origins: split_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }

    /// Delivery client settings derived from this config.
    pub fn stack_config(&self) -> Result<StackConfig> {
        let region: Region = self.contentstack_region.parse()?;
        Ok(StackConfig {
            api_key: self.contentstack_api_key.clone(),
            delivery_token: self.contentstack_delivery_token.clone(),
            environment: self.contentstack_environment.clone(),
            region,
            host: self.contentstack_host.clone(),
            locale: self.contentstack_locale.clone(),
            timeout: Duration::from_secs(self.contentstack_timeout_secs),
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PhoneFrontError::Config(format!("{key} environment variable is required")))
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PhoneFrontError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
