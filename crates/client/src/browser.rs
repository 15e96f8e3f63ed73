//! Fetch-and-derive loop of one list page.
//!
//! Fetched lists are cached per [`ListQuery`]. Changing region or category
//! selects a different cache entry (fetching it on a miss); editing the
//! free-text query never fetches, so a search only ever covers the result set
//! of the current region/category selection.

use std::collections::HashMap;
use std::sync::Arc;

use yurucamp_core::filter::{FilterKind, FilterState, ListQuery};
use yurucamp_core::list_view::{ListView, ListViewController};

use crate::error::ClientError;
use crate::provider::{DataProvider, ListResource};

pub struct ListBrowser<T> {
    provider: Arc<dyn DataProvider>,
    controller: ListViewController<T>,
    cache: HashMap<ListQuery, Vec<T>>,
    loaded: Option<ListQuery>,
}

impl<T: ListResource> ListBrowser<T> {
    pub fn new(provider: Arc<dyn DataProvider>, page_size: usize) -> Result<Self, ClientError> {
        Ok(Self {
            provider,
            controller: ListViewController::new(Vec::new(), page_size)?,
            cache: HashMap::new(),
            loaded: None,
        })
    }

    /// Wrap an already configured controller (page size, page callback).
    pub fn with_controller(provider: Arc<dyn DataProvider>, controller: ListViewController<T>) -> Self {
        Self {
            provider,
            controller,
            cache: HashMap::new(),
            loaded: None,
        }
    }

    pub fn controller(&self) -> &ListViewController<T> {
        &self.controller
    }

    /// Direct access for paging; filter changes should go through the
    /// browser so the backing list follows the server-side filters.
    pub fn controller_mut(&mut self) -> &mut ListViewController<T> {
        &mut self.controller
    }

    pub fn view(&self) -> ListView<'_, T> {
        self.controller.view()
    }

    /// Make the controller hold the list for the current server-side filters.
    ///
    /// Serves from cache when possible. On a failed fetch the previous items
    /// stay in place and the error is returned for the caller to surface.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let key = self.controller.server_query();
        if self.loaded.as_ref() == Some(&key) {
            return Ok(());
        }

        let items = match self.cache.get(&key) {
            Some(cached) => {
                tracing::debug!(resource = T::RESOURCE, ?key, "List served from cache");
                cached.clone()
            }
            None => self.fetch(&key).await?,
        };

        self.controller.replace_items(items);
        self.loaded = Some(key);
        Ok(())
    }

    /// Drop every cached list and refetch the current one.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        self.cache.clear();
        self.loaded = None;
        self.refresh().await
    }

    async fn fetch(&mut self, key: &ListQuery) -> Result<Vec<T>, ClientError> {
        match T::fetch(self.provider.as_ref(), key).await {
            Ok(items) => {
                tracing::debug!(
                    resource = T::RESOURCE,
                    ?key,
                    count = items.len(),
                    "List fetched"
                );
                self.cache.insert(key.clone(), items.clone());
                Ok(items)
            }
            Err(e) => {
                tracing::warn!(resource = T::RESOURCE, ?key, error = %e, "List fetch failed");
                Err(e)
            }
        }
    }

    // -- filters ------------------------------------------------------------

    /// Client-side text search; never fetches.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.controller.set_query(query);
    }

    pub async fn set_region(&mut self, region_id: Option<String>) -> Result<(), ClientError> {
        self.controller.set_region(region_id);
        self.refresh().await
    }

    pub async fn set_category(&mut self, category_id: Option<String>) -> Result<(), ClientError> {
        self.controller.set_category(category_id);
        self.refresh().await
    }

    /// Replace the whole filter selection at once.
    pub async fn set_filters(&mut self, filters: FilterState) -> Result<(), ClientError> {
        self.controller.set_filters(filters);
        self.refresh().await
    }

    pub async fn clear_filter(&mut self, kind: FilterKind) -> Result<(), ClientError> {
        self.controller.clear_filter(kind);
        self.refresh().await
    }

    pub async fn clear_filters(&mut self) -> Result<(), ClientError> {
        self.controller.clear_filters();
        self.refresh().await
    }
}
