//! Client-side page slicing and compact page-number controls.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Page sizes
// ---------------------------------------------------------------------------

/// Page size of card grids (activities, camp areas, events).
pub const CARD_PAGE_SIZE: usize = 8;

/// Page size of compact tables.
pub const TABLE_PAGE_SIZE: usize = 20;

/// Pages shown on each side of the current page in [`page_numbers`].
const SIBLING_PAGES: usize = 1;

// ---------------------------------------------------------------------------
// Page state
// ---------------------------------------------------------------------------

/// Current page and fixed page size of one list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
}

impl PageState {
    /// Start on page 1. A zero page size is rejected.
    pub fn new(page_size: usize) -> Result<Self, CoreError> {
        if page_size == 0 {
            return Err(CoreError::Validation(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            current_page: 1,
            page_size,
        })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Move to `page` without any bounds check; callers keep it in range.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

// ---------------------------------------------------------------------------
// Slicing
// ---------------------------------------------------------------------------

/// One page of an ordered sequence.
///
/// `end_index - start_index == items.len()` always holds; both indices are
/// 0-based into the unpaginated sequence, `end_index` exclusive.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_items: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// Number of pages needed for `total_items`; 0 for an empty sequence.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}

/// Slice page `current_page` (1-based) out of `items`.
///
/// Out-of-range pages, page 0 and a zero page size yield an empty slice.
/// Order is preserved and nothing is deduplicated.
pub fn paginate<T>(items: &[T], page_size: usize, current_page: usize) -> Page<'_, T> {
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);

    if page_size == 0 || current_page == 0 {
        return Page {
            items: &[],
            total_items,
            total_pages,
            start_index: 0,
            end_index: 0,
        };
    }

    let start_index = (current_page - 1).saturating_mul(page_size);
    let end_index = start_index
        .saturating_add(page_size)
        .min(total_items)
        .max(start_index);
    let slice = items.get(start_index..end_index).unwrap_or(&[]);

    Page {
        items: slice,
        total_items,
        total_pages,
        start_index,
        end_index: start_index + slice.len(),
    }
}

// ---------------------------------------------------------------------------
// Page-number controls
// ---------------------------------------------------------------------------

/// One entry of a compact pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "page", rename_all = "snake_case")]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page buttons to render for `total_pages` with `current_page` selected.
///
/// Page 1 and the last page are always shown, as are the pages adjacent to
/// the current one. Every other run of pages collapses into one ellipsis.
///
/// ```
/// use yurucamp_core::pagination::{page_numbers, PageMarker::*};
/// assert_eq!(
///     page_numbers(10, 5),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
/// );
/// ```
pub fn page_numbers(total_pages: usize, current_page: usize) -> Vec<PageMarker> {
    let mut markers = Vec::new();
    let mut last_shown = 0;

    for page in 1..=total_pages {
        let visible =
            page == 1 || page == total_pages || page.abs_diff(current_page) <= SIBLING_PAGES;
        if !visible {
            continue;
        }
        if last_shown != 0 && page - last_shown > 1 {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(PageMarker::Page(page));
        last_shown = page;
    }

    markers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page as P};
    use super::*;

    // -- paginate ------------------------------------------------------------

    #[test]
    fn pages_cover_sequence_exactly() {
        let items: Vec<u32> = (0..25).collect();
        let first = paginate(&items, 8, 1);
        assert_eq!(first.total_pages, 4);

        let mut rebuilt = Vec::new();
        let mut sizes = Vec::new();
        for page in 1..=first.total_pages {
            let p = paginate(&items, 8, page);
            sizes.push(p.items.len());
            rebuilt.extend_from_slice(p.items);
        }
        assert_eq!(sizes, vec![8, 8, 8, 1]);
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn empty_sequence_has_no_pages() {
        let items: Vec<u32> = Vec::new();
        let p = paginate(&items, 8, 1);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.total_items, 0);
    }

    #[test]
    fn indices_follow_page_number() {
        let items: Vec<u32> = (0..25).collect();
        let p = paginate(&items, 8, 4);
        assert_eq!(p.start_index, 24);
        assert_eq!(p.end_index, 25);
        assert_eq!(p.items, &[24]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        let p = paginate(&items, 8, 3);
        assert!(p.items.is_empty());
        assert_eq!(p.start_index, 16);
        assert_eq!(p.end_index, 16);
        assert_eq!(p.total_pages, 1);
    }

    #[test]
    fn page_zero_is_empty() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 2, 0).items.is_empty());
    }

    #[test]
    fn zero_page_size_is_empty() {
        let items = [1, 2, 3];
        let p = paginate(&items, 0, 1);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 20, usize::MAX).items.is_empty());
    }

    // -- PageState -----------------------------------------------------------

    #[test]
    fn page_state_rejects_zero_size() {
        assert!(PageState::new(0).is_err());
        let state = PageState::new(TABLE_PAGE_SIZE).unwrap();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), 20);
    }

    // -- page_numbers --------------------------------------------------------

    #[test]
    fn first_page_of_ten() {
        assert_eq!(page_numbers(10, 1), vec![P(1), P(2), Ellipsis, P(10)]);
    }

    #[test]
    fn last_page_of_ten() {
        assert_eq!(page_numbers(10, 10), vec![P(1), Ellipsis, P(9), P(10)]);
    }

    #[test]
    fn middle_page_of_ten() {
        assert_eq!(
            page_numbers(10, 5),
            vec![P(1), Ellipsis, P(4), P(5), P(6), Ellipsis, P(10)]
        );
    }

    #[test]
    fn small_totals_have_no_ellipsis() {
        assert!(page_numbers(0, 1).is_empty());
        assert_eq!(page_numbers(1, 1), vec![P(1)]);
        assert_eq!(page_numbers(3, 2), vec![P(1), P(2), P(3)]);
    }

    #[test]
    fn single_hidden_page_still_collapses() {
        assert_eq!(page_numbers(5, 4), vec![P(1), Ellipsis, P(3), P(4), P(5)]);
    }
}
