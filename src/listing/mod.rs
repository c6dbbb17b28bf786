use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use time::OffsetDateTime;

use crate::content::{CategoryCatalog, CategoryKey, Listable};
use crate::pagination::{self, PageItem};

pub mod collate;
pub mod query;

pub use collate::Collator;
pub use query::{ListingQuery, DEFAULT_PER_PAGE};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Latest,
    Oldest,
    #[serde(alias = "titleAsc")]
    #[strum(to_string = "title-asc", serialize = "titleAsc")]
    TitleAsc,
    #[serde(alias = "titleDesc")]
    #[strum(to_string = "title-desc", serialize = "titleDesc")]
    TitleDesc,
}

impl SortKey {
    /// Blank or unrecognized input means "no explicit sort", which orders as
    /// [`SortKey::Latest`].
    pub fn parse_lenient(raw: &str) -> Option<SortKey> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse() {
            Ok(key) => Some(key),
            Err(_) => {
                tracing::warn!(sort = trimmed, "unknown sort key, using latest");
                None
            }
        }
    }
}

/// Keeps the items in `selected`, preserving input order. `All` passes the
/// list through; a category the catalog does not know matches nothing.
pub fn filter<T>(items: &[T], selected: &CategoryKey, catalog: &CategoryCatalog) -> Vec<T>
where
    T: Listable + Clone,
{
    match selected {
        CategoryKey::All => items.to_vec(),
        CategoryKey::Category(id) if catalog.contains(id) => items
            .iter()
            .filter(|item| item.category() == id)
            .cloned()
            .collect(),
        CategoryKey::Category(id) => {
            tracing::debug!(category = %id, "filtering on unknown category");
            Vec::new()
        }
    }
}

/// Returns a newly ordered copy. Ties keep their input order. Items without a
/// usable date go last in both date orders.
pub fn sort<T>(items: &[T], key: Option<SortKey>, collator: &Collator) -> Vec<T>
where
    T: Listable + Clone,
{
    let mut sorted = items.to_vec();
    match key.unwrap_or_default() {
        SortKey::Latest => {
            sorted.sort_by(|a, b| by_date(a.published(), b.published(), |x, y| y.cmp(x)))
        }
        SortKey::Oldest => {
            sorted.sort_by(|a, b| by_date(a.published(), b.published(), |x, y| x.cmp(y)))
        }
        SortKey::TitleAsc => sorted.sort_by(|a, b| collator.compare(a.title(), b.title())),
        SortKey::TitleDesc => sorted.sort_by(|a, b| collator.compare(b.title(), a.title())),
    }
    sorted
}

fn by_date<F>(left: Option<OffsetDateTime>, right: Option<OffsetDateTime>, order: F) -> Ordering
where
    F: Fn(&OffsetDateTime, &OffsetDateTime) -> Ordering,
{
    match (left, right) {
        (Some(left), Some(right)) => order(&left, &right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: u32,
    pub current_page: u32,
    pub window: Vec<PageItem>,
    pub has_more: bool,
}

/// Filter → sort → slice → page window, with the per-site knobs applied.
#[derive(Debug, Clone)]
pub struct ListingEngine<'a> {
    catalog: &'a CategoryCatalog,
    collator: Collator,
    sibling_count: i64,
    clamp_current: bool,
}

impl<'a> ListingEngine<'a> {
    pub fn new(catalog: &'a CategoryCatalog) -> Self {
        Self {
            catalog,
            collator: Collator::new(),
            sibling_count: 1,
            clamp_current: true,
        }
    }

    pub fn with_sibling_count(mut self, sibling_count: i64) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    pub fn with_clamp_current(mut self, clamp_current: bool) -> Self {
        self.clamp_current = clamp_current;
        self
    }

    /// Filtered and ordered list, before pagination.
    pub fn arrange<T: Listable + Clone>(&self, items: &[T], query: &ListingQuery) -> Vec<T> {
        let filtered = filter(items, &query.category, self.catalog);
        sort(&filtered, query.sort, &self.collator)
    }

    /// The single page addressed by `query.page`.
    pub fn page<T: Listable + Clone>(&self, items: &[T], query: &ListingQuery) -> ListingPage<T> {
        let arranged = self.arrange(items, query);
        let per_page = query.effective_per_page() as usize;
        let (total_pages, current) = self.bounds(arranged.len(), query);
        let start = (current.saturating_sub(1) as usize).saturating_mul(per_page);
        let page_items: Vec<T> = arranged
            .get(start..)
            .map(|rest| rest.iter().take(per_page).cloned().collect())
            .unwrap_or_default();
        self.finish(page_items, arranged.len(), total_pages, current)
    }

    /// "Load more" view: every page from the first through `query.page`.
    pub fn accumulated<T: Listable + Clone>(
        &self,
        items: &[T],
        query: &ListingQuery,
    ) -> ListingPage<T> {
        let arranged = self.arrange(items, query);
        let per_page = query.effective_per_page() as usize;
        let (total_pages, current) = self.bounds(arranged.len(), query);
        let shown = (current as usize).saturating_mul(per_page).min(arranged.len());
        let total_items = arranged.len();
        let mut arranged = arranged;
        arranged.truncate(shown);
        self.finish(arranged, total_items, total_pages, current)
    }

    fn bounds(&self, total_items: usize, query: &ListingQuery) -> (u32, u32) {
        let per_page = query.effective_per_page() as usize;
        let total_pages =
            u32::try_from(pagination::total_pages(total_items, per_page)).unwrap_or(u32::MAX);
        let requested = query.effective_page();
        let current = if self.clamp_current {
            pagination::clamp_page(i64::from(requested), i64::from(total_pages)) as u32
        } else {
            requested
        };
        if current != requested {
            tracing::debug!(requested, current, total_pages, "clamped listing page");
        }
        (total_pages, current)
    }

    fn finish<T>(
        &self,
        items: Vec<T>,
        total_items: usize,
        total_pages: u32,
        current: u32,
    ) -> ListingPage<T> {
        let window = pagination::page_items(
            i64::from(current),
            i64::from(total_pages),
            self.sibling_count,
        );
        ListingPage {
            items,
            total_items,
            total_pages,
            current_page: current,
            window,
            has_more: current < total_pages,
        }
    }
}
