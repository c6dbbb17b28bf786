//! Property tests for the pagination window and the scroll-progress helpers.
//!
//! 1. No pages means an empty window
//! 2. The first and last pages are always shown
//! 3. Page numbers are strictly increasing and inside `1..=total`
//! 4. An in-range current page is always shown
//! 5. Gap markers stand for at least one hidden page and never touch
//! 6. Progress values stay inside `0..=1`

use laundro_listings::motion::{
    card_progress, center_progress, grid_progress, map_progress, progress_to_scale,
    scroll_progress, transform_progress, ElementRect,
};
use laundro_listings::pagination::{page_items, PageItem};
use proptest::prelude::*;

fn numbers(window: &[PageItem]) -> Vec<i64> {
    window.iter().filter_map(PageItem::page).collect()
}

proptest! {
    #[test]
    fn empty_without_pages(current in -50i64..50, total in -50i64..=0, siblings in -5i64..10) {
        prop_assert!(page_items(current, total, siblings).is_empty());
    }

    #[test]
    fn first_and_last_always_present(
        current in -50i64..200,
        total in 1i64..150,
        siblings in -5i64..10,
    ) {
        let window = page_items(current, total, siblings);
        prop_assert_eq!(window.first(), Some(&PageItem::Page(1)));
        if total == 1 {
            prop_assert_eq!(window.len(), 1);
        } else {
            prop_assert_eq!(window.last(), Some(&PageItem::Page(total)));
        }
    }

    #[test]
    fn pages_increase_within_range(
        current in -50i64..200,
        total in 1i64..150,
        siblings in -5i64..10,
    ) {
        let pages = numbers(&page_items(current, total, siblings));
        prop_assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(pages.iter().all(|page| (1..=total).contains(page)));
    }

    #[test]
    fn current_is_visible_when_in_range(
        (total, current) in (1i64..150).prop_flat_map(|total| (Just(total), 1..=total)),
        siblings in 0i64..10,
    ) {
        let window = page_items(current, total, siblings);
        prop_assert!(window.contains(&PageItem::Page(current)));
        let visible = numbers(&window).len() as i64;
        prop_assert!(visible <= 2 * siblings + 3);
    }

    #[test]
    fn gaps_hide_pages_and_never_touch(
        (total, current) in (1i64..150).prop_flat_map(|total| (Just(total), 1..=total)),
        siblings in 0i64..10,
    ) {
        let window = page_items(current, total, siblings);
        for pair in window.windows(2) {
            match (pair[0], pair[1]) {
                (PageItem::Ellipsis, PageItem::Ellipsis) => {
                    prop_assert!(false, "adjacent gaps in {:?}", window);
                }
                (PageItem::Page(left), PageItem::Page(right)) => {
                    prop_assert_eq!(right, left + 1);
                }
                _ => {}
            }
        }
        for triple in window.windows(3) {
            if let [PageItem::Page(left), PageItem::Ellipsis, PageItem::Page(right)] = triple {
                prop_assert!(right - left >= 2);
            }
        }
    }

    #[test]
    fn wide_siblings_show_everything(total in 1i64..40, extra in 0i64..5) {
        let siblings = total + extra;
        let current = (total + 1) / 2;
        let window = page_items(current, total, siblings);
        prop_assert_eq!(numbers(&window), (1..=total).collect::<Vec<_>>());
    }

    #[test]
    fn progress_stays_in_unit_range(
        top in -5000.0f64..5000.0,
        height in 0.0f64..2000.0,
        viewport in 0.0f64..3000.0,
    ) {
        let rect = ElementRect::new(top, height);
        for progress in [
            scroll_progress(rect, viewport),
            center_progress(rect, viewport),
            grid_progress(rect, viewport),
            card_progress(rect, viewport),
            map_progress(rect, viewport),
        ] {
            prop_assert!((0.0..=1.0).contains(&progress), "progress {progress}");
        }
    }

    #[test]
    fn transform_respects_output_bounds(progress in -2.0f64..3.0, low in -10.0f64..10.0, span in 0.01f64..10.0) {
        let mapped = transform_progress(progress, (0.0, 1.0), (low, low + span));
        prop_assert!(mapped >= low - 1e-9 && mapped <= low + span + 1e-9);
        let scale = progress_to_scale(progress);
        prop_assert!((0.8..=1.0).contains(&scale));
    }
}
