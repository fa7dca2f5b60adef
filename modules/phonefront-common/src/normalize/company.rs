use serde_json::Value;
use tracing::debug;

use super::{asset_url, entry_slug, entry_uid, first_string, reference_name, string_field};
use crate::types::{Company, CompanyPhone};

/// A company record as it arrives at the fetch boundary.
///
/// CMS entries carry `title`, `phones` and `created_at`; anything else is
/// already in output shape (seed data or a pre-shaped entry) and passes through.
#[derive(Debug, Clone, PartialEq)]
pub enum CompanyRecord {
    Cms(Value),
    Static(Company),
}

impl CompanyRecord {
    /// Decide the shape once. Returns `None` for records that fit neither shape.
    pub fn classify(raw: Value) -> Option<Self> {
        let is_cms = ["title", "phones", "created_at"]
            .iter()
            .all(|key| raw.get(*key).is_some_and(|v| !v.is_null()));
        if is_cms {
            return Some(CompanyRecord::Cms(raw));
        }

        match serde_json::from_value::<Company>(raw) {
            Ok(company) => Some(CompanyRecord::Static(company)),
            Err(e) => {
                debug!(error = %e, "Skipping company record with unknown shape");
                None
            }
        }
    }

    pub fn into_company(self) -> Company {
        match self {
            CompanyRecord::Cms(raw) => normalize_company(&raw),
            CompanyRecord::Static(company) => company,
        }
    }
}

/// Reshape a CMS company entry.
pub fn normalize_company(raw: &Value) -> Company {
    let phones: Vec<CompanyPhone> = raw
        .get("phones")
        .and_then(Value::as_array)
        .map(|refs| {
            refs.iter()
                .map(|phone| CompanyPhone {
                    uid: string_field(phone, "uid"),
                    title: reference_name(phone).unwrap_or_default(),
                    slug: string_field(phone, "slug")
                        .or_else(|| string_field(phone, "url").map(|_| entry_slug(phone))),
                })
                .collect()
        })
        .unwrap_or_default();

    Company {
        uid: entry_uid(raw),
        slug: entry_slug(raw),
        name: first_string(raw, &["title", "name"]).unwrap_or_default(),
        logo: asset_url(raw, "logo"),
        description: first_string(raw, &["description", "about"]),
        founded: raw
            .get("founded")
            .and_then(super::scalar_string),
        headquarters: first_string(raw, &["headquarters", "hq"]),
        website: first_string(raw, &["website", "website_url"]),
        phones_count: phones.len() as u32,
        phones,
    }
}
