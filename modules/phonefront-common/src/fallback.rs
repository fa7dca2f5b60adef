//! Seed company data served when the CMS cannot be reached.

use crate::types::{Company, CompanyPhone};

fn company(
    slug: &str,
    name: &str,
    founded: &str,
    headquarters: &str,
    website: &str,
    phones: &[(&str, &str)],
) -> Company {
    let phones: Vec<CompanyPhone> = phones
        .iter()
        .map(|(phone_slug, title)| CompanyPhone {
            uid: None,
            title: title.to_string(),
            slug: Some(phone_slug.to_string()),
        })
        .collect();

    Company {
        uid: format!("static-{slug}"),
        slug: slug.to_string(),
        name: name.to_string(),
        logo: Some(format!("/images/companies/{slug}.svg")),
        description: None,
        founded: Some(founded.to_string()),
        headquarters: Some(headquarters.to_string()),
        website: Some(website.to_string()),
        phones_count: phones.len() as u32,
        phones,
    }
}

pub fn static_companies() -> Vec<Company> {
    vec![
        company(
            "apple",
            "Apple",
            "1976",
            "Cupertino, California",
            "https://www.apple.com",
            &[
                ("iphone-15-pro-max", "iPhone 15 Pro Max"),
                ("iphone-15-pro", "iPhone 15 Pro"),
                ("iphone-15", "iPhone 15"),
                ("iphone-se", "iPhone SE"),
            ],
        ),
        company(
            "samsung",
            "Samsung",
            "1938",
            "Suwon, South Korea",
            "https://www.samsung.com",
            &[
                ("galaxy-s24-ultra", "Galaxy S24 Ultra"),
                ("galaxy-s24", "Galaxy S24"),
                ("galaxy-z-fold-5", "Galaxy Z Fold5"),
                ("galaxy-z-flip-5", "Galaxy Z Flip5"),
                ("galaxy-a54", "Galaxy A54"),
            ],
        ),
        company(
            "google",
            "Google",
            "1998",
            "Mountain View, California",
            "https://store.google.com",
            &[
                ("pixel-8-pro", "Pixel 8 Pro"),
                ("pixel-8", "Pixel 8"),
                ("pixel-7a", "Pixel 7a"),
            ],
        ),
        company(
            "oneplus",
            "OnePlus",
            "2013",
            "Shenzhen, China",
            "https://www.oneplus.com",
            &[("oneplus-12", "OnePlus 12"), ("oneplus-open", "OnePlus Open")],
        ),
        company(
            "xiaomi",
            "Xiaomi",
            "2010",
            "Beijing, China",
            "https://www.mi.com",
            &[
                ("xiaomi-14-ultra", "Xiaomi 14 Ultra"),
                ("redmi-note-13-pro", "Redmi Note 13 Pro"),
                ("poco-f6", "POCO F6"),
            ],
        ),
        company(
            "nothing",
            "Nothing",
            "2020",
            "London, United Kingdom",
            "https://nothing.tech",
            &[("nothing-phone-2", "Phone (2)")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_phone_lists() {
        for company in static_companies() {
            assert_eq!(company.phones_count as usize, company.phones.len());
            assert!(!company.name.is_empty());
        }
    }
}
