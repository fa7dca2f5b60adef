use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{PhoneFrontError, Result};
use crate::types::Taxonomies;

// Taxonomy uids as configured in the stack.
pub const COMPANY: &str = "company";
pub const PHONE: &str = "phone";
pub const PHONE_TYPE: &str = "phone_type";
pub const OS: &str = "os";
pub const FEATURES: &str = "features";
pub const SCREEN_TYPE: &str = "screen_type";
pub const RELEASE_STATUS: &str = "release_status";
pub const NEWS: &str = "news";
pub const PRIORITY: &str = "priority";
pub const SOURCE: &str = "source";
pub const RATING: &str = "rating";

/// Display labels for taxonomy terms, keyed by taxonomy uid then term uid.
///
/// One shared table replaces per-route lookup maps. Built-in defaults can be
/// extended or overridden from a JSON file of the same shape:
/// `{ "company": { "apple": "Apple" }, ... }`.
#[derive(Debug, Clone)]
pub struct TaxonomyLabels {
    tables: HashMap<String, HashMap<String, String>>,
}

impl Default for TaxonomyLabels {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TaxonomyLabels {
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut labels = Self::empty();
        labels.extend(
            COMPANY,
            &[
                ("apple", "Apple"),
                ("samsung", "Samsung"),
                ("google", "Google"),
                ("oneplus", "OnePlus"),
                ("xiaomi", "Xiaomi"),
                ("motorola", "Motorola"),
                ("sony", "Sony"),
                ("nothing", "Nothing"),
                ("oppo", "OPPO"),
                ("vivo", "vivo"),
                ("asus", "ASUS"),
                ("huawei", "Huawei"),
            ],
        );
        labels.extend(
            PHONE_TYPE,
            &[
                ("flagship", "Flagship"),
                ("mid_range", "Mid-Range"),
                ("budget", "Budget"),
                ("foldable", "Foldable"),
                ("gaming", "Gaming"),
                ("rugged", "Rugged"),
            ],
        );
        labels.extend(OS, &[("android", "Android"), ("ios", "iOS")]);
        labels.extend(
            FEATURES,
            &[
                ("5g", "5G"),
                ("wireless_charging", "Wireless Charging"),
                ("fast_charging", "Fast Charging"),
                ("water_resistant", "Water Resistant"),
                ("stylus", "Stylus Support"),
                ("expandable_storage", "Expandable Storage"),
                ("headphone_jack", "Headphone Jack"),
                ("esim", "eSIM"),
            ],
        );
        labels.extend(
            SCREEN_TYPE,
            &[
                ("oled", "OLED"),
                ("amoled", "AMOLED"),
                ("ltpo", "LTPO OLED"),
                ("lcd", "LCD"),
                ("foldable", "Foldable"),
            ],
        );
        labels.extend(
            RELEASE_STATUS,
            &[
                ("released", "Released"),
                ("upcoming", "Upcoming"),
                ("rumored", "Rumored"),
                ("discontinued", "Discontinued"),
            ],
        );
        labels.extend(
            NEWS,
            &[
                ("launch", "Launch"),
                ("review", "Review"),
                ("rumor", "Rumor"),
                ("leak", "Leak"),
                ("update", "Software Update"),
                ("industry", "Industry"),
                ("deals", "Deals"),
            ],
        );
        labels.extend(
            PRIORITY,
            &[("high", "High"), ("medium", "Medium"), ("low", "Low")],
        );
        labels
    }

    /// Built-in labels overlaid with the tables in a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PhoneFrontError::Taxonomy(format!("failed to read {}: {e}", path.display()))
        })?;
        let overrides: HashMap<String, HashMap<String, String>> = serde_json::from_str(&raw)
            .map_err(|e| {
                PhoneFrontError::Taxonomy(format!("failed to parse {}: {e}", path.display()))
            })?;

        let mut labels = Self::builtin();
        for (taxonomy, terms) in overrides {
            let table = labels.tables.entry(taxonomy).or_default();
            for (term, label) in terms {
                table.insert(term.to_lowercase(), label);
            }
        }
        Ok(labels)
    }

    fn extend(&mut self, taxonomy: &str, terms: &[(&str, &str)]) {
        let table = self.tables.entry(taxonomy.to_string()).or_default();
        for (term, label) in terms {
            table.insert(term.to_string(), label.to_string());
        }
    }

    pub fn label(&self, taxonomy: &str, term: &str) -> Option<&str> {
        self.tables
            .get(taxonomy)?
            .get(&term.to_lowercase())
            .map(String::as_str)
    }

    /// Label of the first term of `taxonomy` that has one.
    pub fn first_label(&self, taxonomies: &Taxonomies, taxonomy: &str) -> Option<String> {
        taxonomies
            .get(taxonomy)?
            .iter()
            .find_map(|term| self.label(taxonomy, term))
            .map(String::from)
    }

    /// Labels for every term of `taxonomy`, falling back to the raw term uid.
    pub fn all_labels(&self, taxonomies: &Taxonomies, taxonomy: &str) -> Vec<String> {
        taxonomies
            .get(taxonomy)
            .map(|terms| {
                terms
                    .iter()
                    .map(|term| {
                        self.label(taxonomy, term)
                            .map(String::from)
                            .unwrap_or_else(|| term.clone())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Group an entry's `taxonomies` array (`[{taxonomy_uid, term_uid}]`) by taxonomy uid.
pub fn group_taxonomies(raw: &Value) -> Taxonomies {
    let mut grouped = Taxonomies::new();
    let Some(list) = raw.get("taxonomies").and_then(Value::as_array) else {
        return grouped;
    };

    for item in list {
        let taxonomy = item.get("taxonomy_uid").and_then(Value::as_str);
        let term = item.get("term_uid").and_then(Value::as_str);
        if let (Some(taxonomy), Some(term)) = (taxonomy, term) {
            if taxonomy.is_empty() || term.is_empty() {
                continue;
            }
            let terms = grouped.entry(taxonomy.to_string()).or_default();
            if !terms.iter().any(|t| t == term) {
                terms.push(term.to_string());
            }
        }
    }
    grouped
}
