//! Fixed-size paging of the filtered list and the page-number strip.

use serde::Serialize;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// At or below this many pages, every page number is shown.
const SHOW_ALL_PAGES_UP_TO: usize = 5;

/// One page of a (filtered) list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub page: usize,
    /// Always at least 1, even for an empty list.
    pub total_pages: usize,
}

/// Number of pages needed for `count` items, never less than one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a page number into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slices `items` into page `page` (1-based).
///
/// A page past the end yields an empty item list rather than an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages: total_pages(items.len(), page_size),
    }
}

/// 1-based row number shown next to an item.
pub fn display_number(page: usize, page_size: usize, index_on_page: usize) -> usize {
    (page.max(1) - 1) * page_size + index_on_page + 1
}

/// An entry in the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page numbers to render for the pagination control.
///
/// With five pages or fewer every number is listed. Otherwise the first
/// page, the last page and the neighbours of `current` are kept and each
/// gap between them collapses into one ellipsis.
pub fn page_markers(current: usize, total_pages: usize) -> Vec<PageMarker> {
    let total = total_pages.max(1);
    let visible = (1..=total).filter(|&page| {
        total <= SHOW_ALL_PAGES_UP_TO || page == 1 || page == total || page.abs_diff(current) <= 1
    });

    let mut markers = Vec::new();
    let mut previous: Option<usize> = None;
    for page in visible {
        if previous.is_some_and(|prev| page - prev > 1) {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(PageMarker::Page(page));
        previous = Some(page);
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page as P};
    use super::*;

    #[test]
    fn test_twelve_items_make_three_pages() {
        let items: Vec<u32> = (0..12).collect();

        let first = paginate(&items, 1, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items, vec![0, 1, 2, 3, 4]);

        let last = paginate(&items, 3, 5);
        assert_eq!(last.items, vec![10, 11]);
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let items: Vec<u32> = Vec::new();
        for page in [1, 2, 9] {
            let result = paginate(&items, page, 5);
            assert_eq!(result.total_pages, 1);
            assert!(result.items.is_empty());
        }
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let items: Vec<u32> = (0..7).collect();
        let result = paginate(&items, 4, 5);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 2);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(7, 0), 1);
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(1, 5, 0), 1);
        assert_eq!(display_number(3, 5, 1), 12);
    }

    #[test]
    fn test_markers_show_all_for_small_totals() {
        assert_eq!(page_markers(1, 1), vec![P(1)]);
        assert_eq!(page_markers(3, 5), vec![P(1), P(2), P(3), P(4), P(5)]);
    }

    #[test]
    fn test_markers_collapse_gaps() {
        assert_eq!(
            page_markers(5, 10),
            vec![P(1), Ellipsis, P(4), P(5), P(6), Ellipsis, P(10)]
        );
        assert_eq!(page_markers(1, 10), vec![P(1), P(2), Ellipsis, P(10)]);
        assert_eq!(page_markers(10, 10), vec![P(1), Ellipsis, P(9), P(10)]);
        // Even a single hidden page becomes an ellipsis.
        assert_eq!(page_markers(3, 6), vec![P(1), P(2), P(3), P(4), Ellipsis, P(6)]);
    }
}
