//! Query-driven filtering, sorting and pagination over normalized items.
//!
//! Every stage takes ownership of its input and returns a new `Vec`; stages
//! chain without sharing or mutating an intermediate list.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::dates::parse_date;
use crate::types::{Company, NewsArticle, Phone, Review, Tagged};

// --- Filters ---

/// Comma-split a filter param into a lowercase value set. `None` when empty.
pub fn split_values(param: Option<&str>) -> Option<HashSet<String>> {
    let values: HashSet<String> = param?
        .split(',')
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect();
    (!values.is_empty()).then_some(values)
}

/// Keep items with at least one `taxonomy` term in `values`. Items without
/// that taxonomy never match. A `None` filter keeps everything.
pub fn filter_by_taxonomy<T: Tagged>(
    items: Vec<T>,
    taxonomy: &str,
    values: Option<&HashSet<String>>,
) -> Vec<T> {
    let Some(values) = values else {
        return items;
    };
    items
        .into_iter()
        .filter(|item| {
            item.terms(taxonomy)
                .iter()
                .any(|term| values.contains(&term.to_lowercase()))
        })
        .collect()
}

/// Inclusive price bounds; `max: None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    /// Parse `min-max` or `min+`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(min) = raw.strip_suffix('+') {
            return Some(Self {
                min: min.trim().parse().ok()?,
                max: None,
            });
        }
        let (min, max) = raw.split_once('-')?;
        let min: f64 = min.trim().parse().ok()?;
        let max: f64 = max.trim().parse().ok()?;
        (min <= max).then_some(Self {
            min,
            max: Some(max),
        })
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

/// Parse a comma list of price ranges, dropping unreadable ones.
pub fn parse_price_ranges(param: Option<&str>) -> Vec<PriceRange> {
    param
        .map(|p| p.split(',').filter_map(PriceRange::parse).collect())
        .unwrap_or_default()
}

/// Apply `priceMin`/`priceMax` bounds, then any-of `priceRange` ranges.
pub fn filter_by_price(
    items: Vec<Phone>,
    min: Option<f64>,
    max: Option<f64>,
    ranges: &[PriceRange],
) -> Vec<Phone> {
    items
        .into_iter()
        .filter(|phone| min.map_or(true, |min| phone.price_value >= min))
        .filter(|phone| max.map_or(true, |max| phone.price_value <= max))
        .filter(|phone| ranges.is_empty() || ranges.iter().any(|r| r.contains(phone.price_value)))
        .collect()
}

/// Review `rating` filter. A lone number is a minimum; a list is a set of
/// accepted ratings, matched against the `rating` taxonomy terms or the
/// whole-number rating.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingFilter {
    Min(f64),
    AnyOf(HashSet<String>),
}

impl RatingFilter {
    pub fn parse(param: Option<&str>) -> Option<Self> {
        let values = split_values(param)?;
        if values.len() == 1 {
            let min = values
                .iter()
                .next()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite());
            if let Some(min) = min {
                return Some(RatingFilter::Min(min));
            }
        }
        Some(RatingFilter::AnyOf(values))
    }

    pub fn matches(&self, review: &Review) -> bool {
        match self {
            RatingFilter::Min(min) => review.rating >= *min,
            RatingFilter::AnyOf(values) => {
                let whole = (review.rating.trunc() as i64).to_string();
                values.contains(&whole)
                    || review
                        .terms(crate::taxonomy::RATING)
                        .iter()
                        .any(|term| values.contains(&term.to_lowercase()))
            }
        }
    }
}

pub fn filter_by_rating(items: Vec<Review>, filter: Option<&RatingFilter>) -> Vec<Review> {
    match filter {
        Some(filter) => items.into_iter().filter(|r| filter.matches(r)).collect(),
        None => items,
    }
}

/// Numeric value of a price string such as "$1,299.99"; 0 when unparseable.
pub fn parse_price(raw: &str) -> f64 {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(0.0)
}

// --- Sorting ---

/// Case-insensitive name order with a byte-order tie-break.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneSort {
    /// CMS order.
    #[default]
    Default,
    Name,
    PriceAsc,
    PriceDesc,
    Latest,
    Oldest,
    Rating,
}

impl PhoneSort {
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(|p| p.trim().to_lowercase()).as_deref() {
            Some("name") => PhoneSort::Name,
            Some("price-asc") | Some("price_asc") => PhoneSort::PriceAsc,
            Some("price-desc") | Some("price_desc") => PhoneSort::PriceDesc,
            Some("latest") | Some("newest") => PhoneSort::Latest,
            Some("oldest") => PhoneSort::Oldest,
            Some("rating") => PhoneSort::Rating,
            _ => PhoneSort::Default,
        }
    }
}

pub fn sort_phones(mut items: Vec<Phone>, sort: PhoneSort) -> Vec<Phone> {
    let release = |p: &Phone| p.release_date.as_deref().and_then(parse_date);
    match sort {
        PhoneSort::Default => {}
        PhoneSort::Name => items.sort_by(|a, b| compare_names(&a.name, &b.name)),
        PhoneSort::PriceAsc => items.sort_by(|a, b| a.price_value.total_cmp(&b.price_value)),
        PhoneSort::PriceDesc => items.sort_by(|a, b| b.price_value.total_cmp(&a.price_value)),
        PhoneSort::Latest => items.sort_by(|a, b| release(b).cmp(&release(a))),
        PhoneSort::Oldest => items.sort_by(|a, b| release(a).cmp(&release(b))),
        PhoneSort::Rating => items.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        }),
    }
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsSort {
    #[default]
    Latest,
    Oldest,
}

impl NewsSort {
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(|p| p.trim().to_lowercase()).as_deref() {
            Some("oldest") => NewsSort::Oldest,
            _ => NewsSort::Latest,
        }
    }
}

/// Undated articles sort last for `Latest` and first for `Oldest`.
pub fn sort_news(mut items: Vec<NewsArticle>, sort: NewsSort) -> Vec<NewsArticle> {
    match sort {
        NewsSort::Latest => items.sort_by(|a, b| b.publish_date.cmp(&a.publish_date)),
        NewsSort::Oldest => items.sort_by(|a, b| a.publish_date.cmp(&b.publish_date)),
    }
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompanySort {
    #[default]
    Name,
    Phones,
}

impl CompanySort {
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(|p| p.trim().to_lowercase()).as_deref() {
            Some("phones") | Some("phonescount") | Some("phones_count") => CompanySort::Phones,
            _ => CompanySort::Name,
        }
    }
}

pub fn sort_companies(mut items: Vec<Company>, sort: CompanySort) -> Vec<Company> {
    match sort {
        CompanySort::Name => items.sort_by(|a, b| compare_names(&a.name, &b.name)),
        CompanySort::Phones => items.sort_by(|a, b| {
            b.phones_count
                .cmp(&a.phones_count)
                .then_with(|| compare_names(&a.name, &b.name))
        }),
    }
    items
}

// --- Pagination ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
}

impl Pagination {
    /// Missing values take defaults; zero or negative values clamp to 1.
    pub fn new(page: Option<i64>, page_size: Option<i64>, default_size: u64) -> Self {
        Self {
            page: page.map(clamp_positive).unwrap_or(1),
            page_size: page_size
                .map(clamp_positive)
                .unwrap_or(default_size.max(1)),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of pages needed for `total` items.
    pub fn pages(&self, total: usize) -> u64 {
        (total as u64).div_ceil(self.page_size)
    }
}

fn clamp_positive(value: i64) -> u64 {
    if value < 1 {
        1
    } else {
        value as u64
    }
}

pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> Vec<T> {
    let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(pagination.page_size).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(size).collect()
}

/// Result window for routes that accept either a legacy `limit` or paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    All,
    Limit(usize),
    Page(Pagination),
}

impl Window {
    /// `page`/`pageSize` win over `limit`. A non-positive `limit` is ignored.
    pub fn from_params(
        page: Option<i64>,
        page_size: Option<i64>,
        limit: Option<i64>,
        default_size: u64,
    ) -> Self {
        if page.is_some() || page_size.is_some() {
            return Window::Page(Pagination::new(page, page_size, default_size));
        }
        match limit {
            Some(n) if n > 0 => Window::Limit(usize::try_from(n).unwrap_or(usize::MAX)),
            _ => Window::All,
        }
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        match self {
            Window::All => items,
            Window::Limit(n) => items.into_iter().take(*n).collect(),
            Window::Page(pagination) => paginate(items, *pagination),
        }
    }

    pub fn pagination(&self) -> Option<Pagination> {
        match self {
            Window::Page(pagination) => Some(*pagination),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Taxonomies;
    use std::collections::BTreeMap;

    fn phone(name: &str, price: &str, terms: &[(&str, &str)]) -> Phone {
        let mut taxonomies = Taxonomies::new();
        for (taxonomy, term) in terms {
            taxonomies
                .entry(taxonomy.to_string())
                .or_default()
                .push(term.to_string());
        }
        Phone {
            uid: name.to_lowercase(),
            slug: name.to_lowercase(),
            name: name.to_string(),
            brand: "Unknown".to_string(),
            price: price.to_string(),
            price_value: parse_price(price),
            image: None,
            rating: None,
            release_date: None,
            phone_type: "Flagship".to_string(),
            os: "Android".to_string(),
            description: None,
            features: vec![],
            specs: BTreeMap::new(),
            taxonomies,
        }
    }

    #[test]
    fn split_values_trims_and_lowercases() {
        let values = split_values(Some(" Apple, ,samsung,")).unwrap();
        assert_eq!(values.len(), 2);
        assert!(values.contains("apple"));
        assert!(split_values(Some(" , ")).is_none());
        assert!(split_values(None).is_none());
    }

    #[test]
    fn taxonomy_filter_is_or_within_and_across() {
        let items = vec![
            phone("A", "$1", &[("company", "apple"), ("os", "ios")]),
            phone("B", "$1", &[("company", "samsung"), ("os", "android")]),
            phone("C", "$1", &[("company", "google"), ("os", "android")]),
            phone("D", "$1", &[]),
        ];
        let companies = split_values(Some("apple,samsung"));
        let os = split_values(Some("android"));

        let filtered = filter_by_taxonomy(items, "company", companies.as_ref());
        assert_eq!(filtered.len(), 2);
        let filtered = filter_by_taxonomy(filtered, "os", os.as_ref());
        let names: Vec<_> = filtered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B"]);
    }

    #[test]
    fn taxonomy_less_items_fail_filters() {
        let items = vec![phone("D", "$1", &[])];
        let values = split_values(Some("apple"));
        assert!(filter_by_taxonomy(items, "company", values.as_ref()).is_empty());
    }

    #[test]
    fn no_filter_keeps_all() {
        let items = vec![phone("D", "$1", &[])];
        assert_eq!(filter_by_taxonomy(items, "company", None).len(), 1);
    }

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price("$1,299.99"), 1299.99);
        assert_eq!(parse_price("€ 499"), 499.0);
        assert_eq!(parse_price("TBA"), 0.0);
        assert_eq!(parse_price(""), 0.0);
    }

    #[test]
    fn price_sorts() {
        let items = vec![phone("Hundred", "$100", &[]), phone("Fifty", "$50", &[])];
        let asc = sort_phones(items.clone(), PhoneSort::from_param(Some("price-asc")));
        assert_eq!(asc[0].price, "$50");
        let desc = sort_phones(items, PhoneSort::from_param(Some("price-desc")));
        assert_eq!(desc[0].price, "$100");
    }

    #[test]
    fn price_ranges() {
        assert_eq!(
            PriceRange::parse("500-1000"),
            Some(PriceRange { min: 500.0, max: Some(1000.0) })
        );
        assert_eq!(PriceRange::parse("1000+"), Some(PriceRange { min: 1000.0, max: None }));
        assert_eq!(PriceRange::parse("1000-500"), None);
        assert_eq!(PriceRange::parse("cheap"), None);

        let items = vec![
            phone("A", "$199", &[]),
            phone("B", "$649", &[]),
            phone("C", "$1,199", &[]),
        ];
        let ranges = parse_price_ranges(Some("0-300,1000+,junk"));
        let kept = filter_by_price(items.clone(), None, None, &ranges);
        let names: Vec<_> = kept.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);

        let bounded = filter_by_price(items, Some(200.0), Some(1000.0), &[]);
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0].name, "B");
    }

    fn review(uid: &str, rating: f64, term: Option<&str>) -> Review {
        let mut taxonomies = Taxonomies::new();
        if let Some(term) = term {
            taxonomies.insert("rating".to_string(), vec![term.to_string()]);
        }
        Review {
            uid: uid.to_string(),
            slug: uid.to_string(),
            title: uid.to_string(),
            rating,
            summary: None,
            content: None,
            pros: vec![],
            cons: vec![],
            verdict: None,
            published_at: None,
            author: None,
            author_data: None,
            phone: None,
            phone_data: None,
            taxonomies,
        }
    }

    #[test]
    fn rating_list_is_a_value_set() {
        let items = vec![
            review("r1", 5.0, None),
            review("r2", 2.0, None),
            review("r3", 4.5, None),
            review("r4", 3.0, Some("four_stars")),
        ];

        let filter = RatingFilter::parse(Some("4,5"));
        assert!(matches!(filter, Some(RatingFilter::AnyOf(_))));
        let kept = filter_by_rating(items.clone(), filter.as_ref());
        let uids: Vec<_> = kept.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(uids, vec!["r1", "r3"]);

        let by_term = RatingFilter::parse(Some("Four_Stars, 5"));
        let kept = filter_by_rating(items.clone(), by_term.as_ref());
        let uids: Vec<_> = kept.iter().map(|r| r.uid.as_str()).collect();
        assert_eq!(uids, vec!["r1", "r4"]);

        let min = RatingFilter::parse(Some("3"));
        assert_eq!(min, Some(RatingFilter::Min(3.0)));
        assert_eq!(filter_by_rating(items.clone(), min.as_ref()).len(), 3);

        assert!(RatingFilter::parse(Some(" , ")).is_none());
        assert_eq!(filter_by_rating(items, None).len(), 4);
    }

    #[test]
    fn name_sort_ignores_case() {
        let items = vec![phone("galaxy", "$1", &[]), phone("Pixel", "$1", &[]), phone("iPhone", "$1", &[])];
        let sorted = sort_phones(items, PhoneSort::Name);
        let names: Vec<_> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["galaxy", "iPhone", "Pixel"]);
    }

    #[test]
    fn pagination_clamps() {
        assert_eq!(Pagination::new(Some(0), Some(-5), 12), Pagination { page: 1, page_size: 1 });
        assert_eq!(Pagination::new(None, None, 12), Pagination { page: 1, page_size: 12 });
        assert_eq!(Pagination::new(Some(3), Some(5), 12).offset(), 10);
    }

    #[test]
    fn pagination_length_property() {
        for total in 0..25usize {
            for page in 1..6i64 {
                for size in 1..8i64 {
                    let items: Vec<usize> = (0..total).collect();
                    let p = Pagination::new(Some(page), Some(size), 10);
                    let got = paginate(items, p).len();
                    let expected = (size as usize)
                        .min(total.saturating_sub((page as usize - 1) * size as usize));
                    assert_eq!(got, expected, "total={total} page={page} size={size}");
                }
            }
        }
    }

    #[test]
    fn huge_page_is_empty_not_overflow() {
        let p = Pagination::new(Some(i64::MAX), Some(i64::MAX), 10);
        assert!(paginate(vec![1, 2, 3], p).is_empty());
    }

    #[test]
    fn page_count() {
        let p = Pagination::new(Some(1), Some(10), 10);
        assert_eq!(p.pages(0), 0);
        assert_eq!(p.pages(10), 1);
        assert_eq!(p.pages(11), 2);
    }

    #[test]
    fn window_modes() {
        assert_eq!(Window::from_params(None, None, None, 10), Window::All);
        assert_eq!(Window::from_params(None, None, Some(3), 10), Window::Limit(3));
        assert_eq!(Window::from_params(None, None, Some(0), 10), Window::All);
        assert_eq!(
            Window::from_params(Some(2), None, Some(3), 10),
            Window::Page(Pagination { page: 2, page_size: 10 })
        );
        assert_eq!(Window::Limit(2).apply(vec![1, 2, 3]), vec![1, 2]);
        assert!(Window::Limit(2).pagination().is_none());
    }

    #[test]
    fn company_sorts() {
        let company = |name: &str, count: u32| Company {
            name: name.to_string(),
            phones_count: count,
            ..Default::default()
        };
        let items = vec![company("Sony", 2), company("apple", 5), company("Google", 9)];
        let by_name = sort_companies(items.clone(), CompanySort::from_param(None));
        assert_eq!(by_name[0].name, "apple");
        let by_phones = sort_companies(items, CompanySort::from_param(Some("phones")));
        let counts: Vec<_> = by_phones.iter().map(|c| c.phones_count).collect();
        assert_eq!(counts, vec![9, 5, 2]);
    }
}
