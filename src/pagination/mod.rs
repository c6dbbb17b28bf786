use std::fmt;

use serde::{Serialize, Serializer};

/// One affordance in a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    Page(i64),
    Ellipsis,
}

impl PageItem {
    pub fn page(&self) -> Option<i64> {
        match self {
            PageItem::Page(page) => Some(*page),
            PageItem::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{page}"),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Serializes as a bare page number or the string `"ellipsis"`.
impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(page) => serializer.serialize_i64(*page),
            PageItem::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

/// Computes the page numbers and gap markers to show for `current` out of
/// `total` pages with `sibling_count` neighbours on each side.
///
/// The first and last pages are always present. `current` is used as given,
/// without clamping; see [`clamp_page`].
pub fn page_items(current: i64, total: i64, sibling_count: i64) -> Vec<PageItem> {
    if total <= 0 {
        return Vec::new();
    }

    let first = 1;
    let last = total;
    let start = current.saturating_sub(sibling_count).max(first + 1);
    let end = current.saturating_add(sibling_count).min(last - 1);

    let mut items = vec![PageItem::Page(first)];
    if start > first + 1 {
        items.push(PageItem::Ellipsis);
    }
    if start <= end {
        items.extend((start..=end).map(PageItem::Page));
    }
    if end < last - 1 {
        items.push(PageItem::Ellipsis);
    }
    if last > first {
        items.push(PageItem::Page(last));
    }
    items
}

/// Pulls `current` into `1..=total` (or 1 when there are no pages).
pub fn clamp_page(current: i64, total: i64) -> i64 {
    current.clamp(1, total.max(1))
}

pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1))
}

/// Plain-text pagination bar, current page in brackets.
pub fn render_bar(items: &[PageItem], current: i64) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current => format!("[{page}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    fn pages(values: &[i64]) -> Vec<PageItem> {
        values.iter().copied().map(Page).collect()
    }

    #[test]
    fn single_page() {
        assert_eq!(page_items(1, 1, 1), vec![Page(1)]);
    }

    #[test]
    fn siblings_cover_whole_range() {
        assert_eq!(page_items(3, 5, 3), pages(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn gaps_on_both_sides() {
        assert_eq!(
            page_items(10, 20, 2),
            vec![
                Page(1),
                Ellipsis,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(20)
            ]
        );
    }

    #[test]
    fn near_left_edge_has_no_left_gap() {
        assert_eq!(
            page_items(2, 20, 2),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn near_right_edge_has_no_right_gap() {
        assert_eq!(
            page_items(19, 20, 1),
            vec![Page(1), Ellipsis, Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn no_pages() {
        assert!(page_items(1, 0, 1).is_empty());
        assert!(page_items(4, -3, 1).is_empty());
    }

    #[test]
    fn non_positive_siblings_collapse_range() {
        assert_eq!(page_items(5, 10, 0), vec![Page(1), Ellipsis, Page(5), Ellipsis, Page(10)]);
        assert_eq!(page_items(5, 10, -2), vec![Page(1), Ellipsis, Ellipsis, Page(10)]);
        assert_eq!(page_items(1, 2, 0), pages(&[1, 2]));
    }

    #[test]
    fn out_of_range_current_passes_through() {
        assert_eq!(page_items(50, 20, 2), vec![Page(1), Ellipsis, Page(20)]);
        assert_eq!(page_items(-5, 20, 2), vec![Page(1), Ellipsis, Page(20)]);
    }

    #[test]
    fn clamps_and_counts_pages() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 0), 1);
        assert_eq!(total_pages(8, 6), 2);
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(12, 6), 2);
    }

    #[test]
    fn serializes_to_wire_alphabet() -> anyhow::Result<()> {
        let json = serde_json::to_string(&page_items(10, 20, 1))?;
        assert_eq!(json, r#"[1,"ellipsis",9,10,11,"ellipsis",20]"#);
        Ok(())
    }

    #[test]
    fn renders_bar() {
        insta::assert_snapshot!(render_bar(&page_items(10, 20, 2), 10), @"1 … 8 9 [10] 11 12 … 20");
    }
}
