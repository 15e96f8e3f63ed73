//! Filter-then-paginate controller behind every list page.
//!
//! The controller owns the latest fetched items plus the filter and page
//! state. Nothing is cached: [`ListViewController::view`] re-derives the
//! visible page from the full item list each time it is called, so callers
//! invoke it after any change to items, filters or page.

use serde::Serialize;

use crate::error::CoreError;
use crate::filter::{filter_items, ActiveFilter, FilterKind, FilterState, ListQuery, Searchable};
use crate::pagination::{page_numbers, paginate, total_pages, PageMarker, PageState};

/// Invoked with the new page number after an explicit page change.
///
/// The UI uses this to scroll the viewport back to the top.
pub type PageChangeCallback = Box<dyn FnMut(usize) + Send>;

/// Everything a list page renders for the current state.
#[derive(Debug, Serialize)]
pub struct ListView<'a, T> {
    /// Items on the current page, in backend order.
    pub items: Vec<&'a T>,
    /// Matches across all pages.
    pub total_matches: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub active_filters: Vec<ActiveFilter>,
    pub pages: Vec<PageMarker>,
}

pub struct ListViewController<T> {
    items: Vec<T>,
    filters: FilterState,
    page: PageState,
    on_page_change: Option<PageChangeCallback>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for ListViewController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListViewController")
            .field("items", &self.items.len())
            .field("filters", &self.filters)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}

impl<T: Searchable> ListViewController<T> {
    /// Create a controller on page 1 with no filters.
    pub fn new(items: Vec<T>, page_size: usize) -> Result<Self, CoreError> {
        Ok(Self {
            items,
            filters: FilterState::default(),
            page: PageState::new(page_size)?,
            on_page_change: None,
        })
    }

    /// Register the page-change side effect.
    pub fn with_page_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.on_page_change = Some(Box::new(callback));
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size()
    }

    /// Server-side filters of the current state, used as the fetch key.
    pub fn server_query(&self) -> ListQuery {
        self.filters.server_query()
    }

    // -- data ---------------------------------------------------------------

    /// Swap in a freshly fetched item list.
    ///
    /// The page is left alone; a refetch caused by a filter change has
    /// already reset it through the filter setter.
    pub fn replace_items(&mut self, items: Vec<T>) {
        tracing::debug!(count = items.len(), "List items replaced");
        self.items = items;
    }

    // -- filters ------------------------------------------------------------

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = query.into();
        self.filters_changed();
    }

    pub fn set_region(&mut self, region_id: Option<String>) {
        self.filters.region_id = region_id;
        self.filters_changed();
    }

    pub fn set_category(&mut self, category_id: Option<String>) {
        self.filters.category_id = category_id;
        self.filters_changed();
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.filters_changed();
    }

    /// Remove one filter chip.
    pub fn clear_filter(&mut self, kind: FilterKind) {
        self.filters.clear(kind);
        self.filters_changed();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.filters_changed();
    }

    fn filters_changed(&mut self) {
        self.page.reset();
        tracing::debug!(
            query = %self.filters.query,
            region_id = ?self.filters.region(),
            category_id = ?self.filters.category(),
            "List filters changed, page reset",
        );
    }

    // -- paging -------------------------------------------------------------

    /// Pages across the filtered items.
    pub fn total_pages(&self) -> usize {
        total_pages(self.match_count(), self.page.page_size())
    }

    /// Number of items passing the current filters.
    pub fn match_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| crate::filter::matches(*item, &self.filters))
            .count()
    }

    /// Jump to `page`.
    ///
    /// Pages outside `1..=total_pages` are ignored, matching the disabled
    /// controls in the UI. Returns `true` and fires the page-change callback
    /// only when the page actually changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        if page == 0 || page > total || page == self.page.current_page() {
            return false;
        }
        self.page.set_current_page(page);
        tracing::debug!(page, total_pages = total, "List page changed");
        if let Some(callback) = self.on_page_change.as_mut() {
            callback(page);
        }
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page.current_page() + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.page.current_page().checked_sub(1) {
            Some(page) => self.set_page(page),
            None => false,
        }
    }

    // -- derivation ---------------------------------------------------------

    /// Filter the full item list, then slice out the current page.
    pub fn view(&self) -> ListView<'_, T> {
        let filtered = filter_items(&self.items, &self.filters);
        let current_page = self.page.current_page();
        let page = paginate(&filtered, self.page.page_size(), current_page);

        ListView {
            items: page.items.to_vec(),
            total_matches: page.total_items,
            current_page,
            total_pages: page.total_pages,
            start_index: page.start_index,
            end_index: page.end_index,
            active_filters: self.filters.active_filters(),
            pages: page_numbers(page.total_pages, current_page),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
