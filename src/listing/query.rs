use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::content::{CategoryCatalog, CategoryKey};

use super::SortKey;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 6;

/// Unreserved characters stay literal in query values.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Listing selection as carried in the page URL
/// (`?page=2&category=tipsAndTricks&sort=oldest&perPage=6`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub category: CategoryKey,
    pub sort: Option<SortKey>,
    pub page: u32,
    pub per_page: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            category: CategoryKey::All,
            sort: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ListingQuery {
    pub fn effective_page(&self) -> u32 {
        if self.page == 0 {
            DEFAULT_PAGE
        } else {
            self.page
        }
    }

    pub fn effective_per_page(&self) -> u32 {
        if self.per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            self.per_page
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Reads listing state from a URL query string. Unknown keys are ignored
    /// and malformed values fall back to their defaults.
    pub fn from_query_string(input: &str, catalog: &CategoryCatalog) -> Self {
        Self::parse_onto(ListingQuery::default(), input, catalog)
    }

    /// Like [`ListingQuery::from_query_string`], with absent or malformed
    /// parameters taken from `base` instead of the site defaults.
    pub fn parse_onto(base: ListingQuery, input: &str, catalog: &CategoryCatalog) -> Self {
        let mut query = base.clone();
        let input = input.trim().trim_start_matches('?');
        for pair in input.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw_value);
            match decode_component(raw_key).as_str() {
                "page" => query.page = parse_positive(&value).unwrap_or(base.page),
                "perPage" | "per_page" => {
                    query.per_page = parse_positive(&value).unwrap_or(base.per_page)
                }
                "category" => query.category = CategoryKey::parse(&value, catalog),
                "sort" => query.sort = SortKey::parse_lenient(&value).or(base.sort),
                other => tracing::trace!(key = other, "ignoring query parameter"),
            }
        }
        query
    }

    /// Canonical query string; parameters at their default value are omitted.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if self.effective_page() > DEFAULT_PAGE {
            parts.push(format!("page={}", self.effective_page()));
        }
        if !self.category.is_all() {
            parts.push(format!("category={}", encode_component(self.category.as_str())));
        }
        if let Some(sort) = self.sort {
            parts.push(format!("sort={sort}"));
        }
        if self.effective_per_page() != DEFAULT_PER_PAGE {
            parts.push(format!("perPage={}", self.effective_per_page()));
        }
        parts.join("&")
    }
}

/// Leading-digit integer parse; zero counts as absent and values past
/// `u32::MAX` saturate.
fn parse_positive(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    Some(value).filter(|value| *value > 0)
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CategoryId;

    fn catalog() -> CategoryCatalog {
        CategoryCatalog::articles()
    }

    #[test]
    fn parses_full_state() {
        let query = ListingQuery::from_query_string(
            "?page=2&category=tipsAndTricks&sort=oldest&perPage=4",
            &catalog(),
        );
        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 4);
        assert_eq!(query.sort, Some(SortKey::Oldest));
        assert_eq!(
            query.category,
            CategoryKey::Category(CategoryId::new("tipsAndTricks"))
        );
    }

    #[test]
    fn malformed_values_fall_back() {
        let query = ListingQuery::from_query_string(
            "page=abc&perPage=0&sort=random&utm_source=mail&category=",
            &catalog(),
        );
        assert_eq!(query, ListingQuery::default());
    }

    #[test]
    fn leading_digits_are_enough() {
        let query = ListingQuery::from_query_string("page=3rd", &catalog());
        assert_eq!(query.page, 3);
    }

    #[test]
    fn oversized_page_saturates() {
        let query = ListingQuery::from_query_string("page=99999999999&perPage=0007", &catalog());
        assert_eq!(query.page, u32::MAX);
        assert_eq!(query.per_page, 7);
        assert_eq!(ListingQuery::from_query_string("page=000", &catalog()).page, 1);
    }

    #[test]
    fn stray_percent_signs_survive_decoding() {
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("a%zz+b"), "a%zz b");
        assert_eq!(decode_component("%CE%B3"), "γ");
        assert_eq!(encode_component("γ & co"), "%CE%B3%20%26%20co");
    }

    #[test]
    fn decodes_labels_and_slugs() {
        let query =
            ListingQuery::from_query_string("category=Useful+resources&sort=titleDesc", &catalog());
        assert_eq!(
            query.category,
            CategoryKey::Category(CategoryId::new("usefulResources"))
        );
        assert_eq!(query.sort, Some(SortKey::TitleDesc));

        let query = ListingQuery::from_query_string("category=company%2Dnews", &catalog());
        assert_eq!(
            query.category,
            CategoryKey::Category(CategoryId::new("companyNews"))
        );
    }

    #[test]
    fn parses_onto_configured_base() {
        let base = ListingQuery {
            per_page: 9,
            sort: Some(SortKey::TitleAsc),
            ..ListingQuery::default()
        };
        let query = ListingQuery::parse_onto(base.clone(), "page=2&perPage=zero", &catalog());
        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 9);
        assert_eq!(query.sort, Some(SortKey::TitleAsc));
        assert_eq!(ListingQuery::parse_onto(base.clone(), "", &catalog()), base);
    }

    #[test]
    fn canonical_string_omits_defaults() {
        assert_eq!(ListingQuery::default().to_query_string(), "");
        let query = ListingQuery {
            category: CategoryKey::Category(CategoryId::new("companyNews")),
            sort: Some(SortKey::TitleAsc),
            page: 3,
            per_page: 6,
        };
        assert_eq!(
            query.to_query_string(),
            "page=3&category=companyNews&sort=title-asc"
        );
        assert_eq!(
            query.with_page(1).to_query_string(),
            "category=companyNews&sort=title-asc"
        );
    }

    #[test]
    fn encodes_unknown_categories() {
        let query = ListingQuery {
            category: CategoryKey::Category(CategoryId::new("odd key")),
            per_page: 12,
            ..ListingQuery::default()
        };
        assert_eq!(query.to_query_string(), "category=odd%20key&perPage=12");
    }
}
