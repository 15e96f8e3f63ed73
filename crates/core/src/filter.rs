//! Free-text and categorical filtering for list views.
//!
//! Region and category are *server-side* filters: they are sent to the
//! backend as query parameters and select which records get fetched. The
//! free-text query is applied client-side over whatever the server returned,
//! so a search never reaches outside the current region/category result set.

use serde::{Deserialize, Serialize};

use crate::models::{Category, Region};

// ---------------------------------------------------------------------------
// Searchable records
// ---------------------------------------------------------------------------

/// A record that can be matched by [`matches`].
pub trait Searchable {
    /// Fields the free-text query is matched against. `None` entries are
    /// treated as empty strings.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Region foreign key, if the record has one.
    fn region_id(&self) -> Option<&str> {
        None
    }

    /// Category foreign key, if the record has one.
    fn category_id(&self) -> Option<&str> {
        None
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_fields(&self) -> Vec<Option<&str>> {
        (**self).search_fields()
    }

    fn region_id(&self) -> Option<&str> {
        (**self).region_id()
    }

    fn category_id(&self) -> Option<&str> {
        (**self).category_id()
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Which part of a [`FilterState`] a chip or a clear action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Query,
    Region,
    Category,
}

/// Current filter selection of a list view.
///
/// Empty strings and `None` both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
}

/// One non-default filter, rendered as a removable chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    pub kind: FilterKind,
    pub value: String,
}

/// Server-side half of a [`FilterState`].
///
/// Doubles as the cache key for fetched lists: two queries that compare
/// equal select the same backend result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl ListQuery {
    /// Query-string pairs in the backend's parameter naming.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(region) = self.region_id.as_deref() {
            pairs.push(("regionId", region));
        }
        if let Some(category) = self.category_id.as_deref() {
            pairs.push(("categoryId", category));
        }
        pairs
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FilterState {
    /// Filter with only a free-text query set.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Trimmed query, or `None` when it would match everything.
    pub fn trimmed_query(&self) -> Option<&str> {
        let q = self.query.trim();
        if q.is_empty() { None } else { Some(q) }
    }

    pub fn region(&self) -> Option<&str> {
        non_empty(&self.region_id)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category_id)
    }

    /// `true` when no filter constrains the list.
    pub fn is_default(&self) -> bool {
        self.trimmed_query().is_none() && self.region().is_none() && self.category().is_none()
    }

    /// Reset one filter to its default.
    pub fn clear(&mut self, kind: FilterKind) {
        match kind {
            FilterKind::Query => self.query.clear(),
            FilterKind::Region => self.region_id = None,
            FilterKind::Category => self.category_id = None,
        }
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Non-default filters in display order (query, region, category).
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if let Some(q) = self.trimmed_query() {
            active.push(ActiveFilter {
                kind: FilterKind::Query,
                value: q.to_string(),
            });
        }
        if let Some(region) = self.region() {
            active.push(ActiveFilter {
                kind: FilterKind::Region,
                value: region.to_string(),
            });
        }
        if let Some(category) = self.category() {
            active.push(ActiveFilter {
                kind: FilterKind::Category,
                value: category.to_string(),
            });
        }
        active
    }

    /// The filters that are sent to the backend.
    pub fn server_query(&self) -> ListQuery {
        ListQuery {
            region_id: self.region().map(str::to_string),
            category_id: self.category().map(str::to_string),
        }
    }
}

impl ActiveFilter {
    /// Chip label: region and category ids resolve to their display names,
    /// falling back to the raw id when the lookup has no entry.
    pub fn label(&self, regions: &[Region], categories: &[Category]) -> String {
        match self.kind {
            FilterKind::Query => format!("\"{}\"", self.value),
            FilterKind::Region => regions
                .iter()
                .find(|r| r.id == self.value)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| self.value.clone()),
            FilterKind::Category => categories
                .iter()
                .find(|c| c.id == self.value)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| self.value.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

fn fold(text: &str) -> String {
    text.to_lowercase()
}

fn matches_key(item_key: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => item_key == Some(wanted),
    }
}

/// Decide whether `item` passes every filter in `filters`.
///
/// The query matches when any searchable field contains it as a
/// case-insensitive substring. Region and category must be equal when set.
/// Unset filters are vacuously true.
pub fn matches<T: Searchable + ?Sized>(item: &T, filters: &FilterState) -> bool {
    if !matches_key(item.region_id(), filters.region()) {
        return false;
    }
    if !matches_key(item.category_id(), filters.category()) {
        return false;
    }

    let Some(query) = filters.trimmed_query() else {
        return true;
    };
    let needle = fold(query);
    item.search_fields()
        .into_iter()
        .any(|field| fold(field.unwrap_or_default()).contains(&needle))
}

/// Borrow every item of `items` that passes `filters`, preserving order.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], filters: &FilterState) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, filters)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
