use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Taxonomy uid → term uids attached to an entry.
pub type Taxonomies = BTreeMap<String, Vec<String>>;

/// Items that carry taxonomy terms and can be filtered by them.
pub trait Tagged {
    fn taxonomies(&self) -> &Taxonomies;

    fn terms(&self, taxonomy: &str) -> &[String] {
        self.taxonomies()
            .get(taxonomy)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// --- Phones ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub uid: String,
    pub slug: String,
    pub name: String,
    pub brand: String,
    /// Price as authored, e.g. "$999".
    pub price: String,
    /// Numeric price with currency symbols stripped; 0 when unparseable.
    pub price_value: f64,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub release_date: Option<String>,
    #[serde(rename = "type")]
    pub phone_type: String,
    pub os: String,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub specs: BTreeMap<String, String>,
    pub taxonomies: Taxonomies,
}

impl Tagged for Phone {
    fn taxonomies(&self) -> &Taxonomies {
        &self.taxonomies
    }
}

// --- Reviews ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub uid: Option<String>,
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRef {
    pub uid: Option<String>,
    pub title: String,
    pub slug: Option<String>,
}

/// A phone review. `author`/`author_data` and `phone`/`phone_data` are either
/// both present or both absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub uid: String,
    pub slug: String,
    pub title: String,
    pub rating: f64,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub verdict: Option<String>,
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_data: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_data: Option<PhoneRef>,
    pub taxonomies: Taxonomies,
}

impl Tagged for Review {
    fn taxonomies(&self) -> &Taxonomies {
        &self.taxonomies
    }
}

// --- News ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub uid: String,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub source: Option<String>,
    pub category: String,
    pub publish_date: Option<DateTime<Utc>>,
    pub date_pretty: String,
    pub is_breaking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub taxonomies: Taxonomies,
}

impl Tagged for NewsArticle {
    fn taxonomies(&self) -> &Taxonomies {
        &self.taxonomies
    }
}

// --- Companies ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyPhone {
    pub uid: Option<String>,
    pub title: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub uid: String,
    pub slug: String,
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub founded: Option<String>,
    pub headquarters: Option<String>,
    pub website: Option<String>,
    pub phones_count: u32,
    pub phones: Vec<CompanyPhone>,
}

// --- Price filters ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilter {
    pub uid: String,
    pub slug: String,
    pub label: String,
    pub min_price: f64,
    pub max_price: f64,
}
