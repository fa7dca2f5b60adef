use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use phonefront_common::normalize::{normalize_news, normalize_phone, normalize_review, CompanyRecord};
use phonefront_common::pipeline::{
    filter_by_price, filter_by_taxonomy, paginate, parse_price_ranges, sort_phones, split_values,
    Pagination, PhoneSort,
};
use phonefront_common::{taxonomy, Phone, TaxonomyLabels};

fn catalog() -> Vec<Value> {
    vec![
        json!({
            "uid": "blt01",
            "title": "Galaxy S24 Ultra",
            "url": "/phones/galaxy-s24-ultra",
            "price": "$1,299.99",
            "release_date": "2024-01-31",
            "company": [{"uid": "c_samsung", "title": "Samsung"}],
            "featured_image": {"url": "https://images.example/s24.png"},
            "full_specifications": [
                {"display": {"size": "6.8\"", "refresh_rate": "120Hz"}},
                {"other": {"s_pen": "Built-in"}}
            ],
            "key_specifications": {"display": "6.1\"", "battery": "5000 mAh"},
            "taxonomies": [
                {"taxonomy_uid": "company", "term_uid": "samsung"},
                {"taxonomy_uid": "os", "term_uid": "android"},
                {"taxonomy_uid": "features", "term_uid": "stylus"},
                {"taxonomy_uid": "features", "term_uid": "5g"}
            ]
        }),
        json!({
            "uid": "blt02",
            "title": "iPhone 15",
            "slug": "iphone-15",
            "price": 799,
            "release_date": "2023-09-22",
            "images": [{"url": "https://images.example/ip15.png"}],
            "taxonomies": [
                {"taxonomy_uid": "company", "term_uid": "apple"},
                {"taxonomy_uid": "os", "term_uid": "ios"},
                {"taxonomy_uid": "phone_type", "term_uid": "mid_range"}
            ]
        }),
        json!({
            "uid": "blt03",
            "title": "Pixel 8a",
            "price": "499",
            "release_date": "2024-05-14",
            "taxonomies": [{"taxonomy_uid": "company", "term_uid": "google"}]
        }),
    ]
}

fn phones(labels: &TaxonomyLabels) -> Vec<Phone> {
    catalog()
        .iter()
        .map(|raw| normalize_phone(raw, labels))
        .collect()
}

#[test]
fn catalog_normalizes_into_stable_shape() {
    let labels = TaxonomyLabels::builtin();
    let phones = phones(&labels);

    let s24 = &phones[0];
    assert_eq!(s24.slug, "galaxy-s24-ultra");
    assert_eq!(s24.brand, "Samsung");
    assert_eq!(s24.price_value, 1299.99);
    assert_eq!(s24.image.as_deref(), Some("https://images.example/s24.png"));
    assert_eq!(s24.specs["display"], "6.8\"");
    assert_eq!(s24.specs["refreshRate"], "120Hz");
    assert_eq!(s24.specs["sPen"], "Built-in");
    assert_eq!(s24.specs["battery"], "5000 mAh");
    assert_eq!(s24.features, vec!["Stylus Support", "5G"]);
    assert_eq!(s24.phone_type, "Flagship");

    let iphone = &phones[1];
    assert_eq!(iphone.slug, "iphone-15");
    assert_eq!(iphone.brand, "Apple");
    assert_eq!(iphone.os, "iOS");
    assert_eq!(iphone.phone_type, "Mid-Range");
    assert_eq!(iphone.price_value, 799.0);

    let pixel = &phones[2];
    assert_eq!(pixel.slug, "blt03");
    assert_eq!(pixel.brand, "Google");
    assert_eq!(pixel.os, "Android");
    assert!(pixel.specs.is_empty());
}

#[test]
fn phone_query_runs_filter_sort_paginate() {
    let labels = TaxonomyLabels::builtin();

    let companies = split_values(Some("samsung, Google"));
    let filtered = filter_by_taxonomy(phones(&labels), taxonomy::COMPANY, companies.as_ref());
    let ranges = parse_price_ranges(Some("0-600,1000+"));
    let filtered = filter_by_price(filtered, None, None, &ranges);
    let sorted = sort_phones(filtered, PhoneSort::from_param(Some("price-desc")));

    let total = sorted.len();
    let page = paginate(sorted, Pagination::new(Some(2), Some(1), 12));

    assert_eq!(total, 2);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Pixel 8a");
}

#[test]
fn sort_by_release_date() {
    let labels = TaxonomyLabels::builtin();
    let latest = sort_phones(phones(&labels), PhoneSort::Latest);
    let names: Vec<&str> = latest.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Pixel 8a", "Galaxy S24 Ultra", "iPhone 15"]);
}

#[test]
fn label_overrides_from_file() {
    let path = std::env::temp_dir().join(format!("phonefront-labels-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"company": {"google": "Google LLC"}, "news": {"deals": "Deals"}}"#)
        .unwrap();

    let labels = TaxonomyLabels::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(labels.label(taxonomy::COMPANY, "google"), Some("Google LLC"));
    assert_eq!(labels.label(taxonomy::COMPANY, "apple"), Some("Apple"));
    assert_eq!(labels.label(taxonomy::NEWS, "DEALS"), Some("Deals"));
    assert_eq!(phones(&labels)[2].brand, "Google LLC");
}

#[test]
fn missing_label_file_is_an_error() {
    let result = TaxonomyLabels::from_json_file("/nonexistent/phonefront/labels.json");
    assert!(result.is_err());
}

#[test]
fn review_references_need_a_name() {
    let review = normalize_review(&json!({
        "uid": "r1",
        "title": "Great camera",
        "rating": "4.5",
        "author": [{"uid": "a1"}],
        "phone": [{"uid": "p1", "title": "Pixel 8a", "url": "/phones/pixel-8a"}],
        "taxonomies": [{"taxonomy_uid": "phone", "term_uid": "pixel_8a"}]
    }));

    assert_eq!(review.rating, 4.5);
    assert!(review.author.is_none());
    assert!(review.author_data.is_none());
    assert_eq!(review.phone.as_deref(), Some("Pixel 8a"));
    assert_eq!(review.taxonomies[taxonomy::PHONE], vec!["pixel_8a"]);
}

#[test]
fn breaking_news_gets_badge_and_category_label() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let labels = TaxonomyLabels::builtin();
    let article = normalize_news(
        &json!({
            "uid": "n1",
            "title": "Launch day",
            "is_breaking": true,
            "date": "2024-06-15T09:00:00Z",
            "taxonomies": [{"taxonomy_uid": "news", "term_uid": "unlisted"}, {"taxonomy_uid": "news", "term_uid": "update"}]
        }),
        &labels,
        now,
    );

    assert_eq!(article.badge.as_deref(), Some("BREAKING"));
    assert_eq!(article.date_pretty, "3 hours ago");
    assert_eq!(article.category, "Software Update");
}

#[test]
fn company_records_keep_their_shape() {
    let cms = CompanyRecord::classify(json!({
        "uid": "c1",
        "title": "Nothing",
        "created_at": "2024-01-01T00:00:00Z",
        "phones": [{"uid": "p1", "title": "Phone (2)"}]
    }))
    .unwrap();
    assert!(matches!(cms, CompanyRecord::Cms(_)));
    assert_eq!(cms.into_company().phones_count, 1);

    let seeded = CompanyRecord::classify(json!({
        "uid": "c2",
        "slug": "fairphone",
        "name": "Fairphone",
        "phonesCount": 3
    }))
    .unwrap();
    let company = seeded.into_company();
    assert_eq!(company.name, "Fairphone");
    assert_eq!(company.phones_count, 3);
}
