use serde_json::Value;

use super::{
    asset_url, entry_slug, entry_uid, first_reference, first_string, number_field,
    reference_name, string_field, string_list,
};
use crate::taxonomy::group_taxonomies;
use crate::types::{Author, PhoneRef, Review};

pub fn normalize_review(raw: &Value) -> Review {
    let author_data = author_data(raw);
    let phone_data = phone_data(raw);

    Review {
        uid: entry_uid(raw),
        slug: entry_slug(raw),
        title: first_string(raw, &["title"]).unwrap_or_default(),
        rating: number_field(raw, "rating").unwrap_or(0.0),
        summary: first_string(raw, &["summary", "excerpt"]),
        content: first_string(raw, &["content", "body"]),
        pros: string_list(raw, "pros"),
        cons: string_list(raw, "cons"),
        verdict: string_field(raw, "verdict"),
        published_at: first_string(raw, &["publish_date", "published_at", "created_at"]),
        author: author_data.as_ref().map(|a| a.name.clone()),
        author_data,
        phone: phone_data.as_ref().map(|p| p.title.clone()),
        phone_data,
        taxonomies: group_taxonomies(raw),
    }
}

/// Only populated when `author` is a non-empty array whose first element has a name.
fn author_data(raw: &Value) -> Option<Author> {
    let reference = first_reference(raw, "author")?;
    let name = reference_name(reference)?;
    Some(Author {
        uid: string_field(reference, "uid"),
        name,
        bio: first_string(reference, &["bio", "description"]),
        avatar: asset_url(reference, "avatar").or_else(|| asset_url(reference, "profile_image")),
    })
}

/// Same contract as the author: no name, no phone.
fn phone_data(raw: &Value) -> Option<PhoneRef> {
    let reference = first_reference(raw, "phone")?;
    let title = reference_name(reference)?;
    Some(PhoneRef {
        uid: string_field(reference, "uid"),
        title,
        slug: string_field(reference, "slug").or_else(|| {
            string_field(reference, "url")
                .map(|_| entry_slug(reference))
                .filter(|s| !s.is_empty())
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_author_array_yields_nothing() {
        let review = normalize_review(&json!({"uid": "r1", "author": [], "phone": []}));
        assert_eq!(review.author, None);
        assert_eq!(review.author_data, None);
        assert_eq!(review.phone, None);
        assert_eq!(review.phone_data, None);
    }

    #[test]
    fn nameless_author_yields_nothing() {
        let review = normalize_review(&json!({
            "uid": "r2",
            "author": [{"uid": "a1", "title": "  "}],
            "phone": [{"uid": "p1"}]
        }));
        assert_eq!(review.author_data, None);
        assert_eq!(review.phone_data, None);
    }

    #[test]
    fn populated_references() {
        let review = normalize_review(&json!({
            "uid": "r3",
            "title": "Galaxy S24 review",
            "rating": "4.5",
            "pros": ["Bright screen"],
            "cons": "Slow charging\nPricey",
            "author": [{"uid": "a1", "title": "Sam Lee", "avatar": {"url": "https://img/sam.png"}}],
            "phone": [{"uid": "p1", "title": "Galaxy S24", "url": "/phones/galaxy-s24"}]
        }));
        assert_eq!(review.rating, 4.5);
        assert_eq!(review.author.as_deref(), Some("Sam Lee"));
        let author = review.author_data.unwrap();
        assert_eq!(author.avatar.as_deref(), Some("https://img/sam.png"));
        assert_eq!(review.phone.as_deref(), Some("Galaxy S24"));
        assert_eq!(review.phone_data.unwrap().slug.as_deref(), Some("galaxy-s24"));
        assert_eq!(review.cons, vec!["Slow charging", "Pricey"]);
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let review = normalize_review(&json!({"uid": "r4", "author": []}));
        let value = serde_json::to_value(&review).unwrap();
        assert!(value.get("author").is_none());
        assert!(value.get("authorData").is_none());
    }
}
