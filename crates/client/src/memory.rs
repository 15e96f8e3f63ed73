//! In-memory [`DataProvider`] for tests and offline demos.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use yurucamp_core::filter::{matches, FilterState, ListQuery, Searchable};
use yurucamp_core::models::{Activity, CampArea, Category, Event, Region};

use crate::error::ClientError;
use crate::provider::DataProvider;

/// Serves fixed record sets, applying region/category filters the way the
/// backend does.
#[derive(Debug, Default)]
pub struct StaticDataProvider {
    pub activities: Vec<Activity>,
    pub camp_areas: Vec<CampArea>,
    pub events: Vec<Event>,
    pub regions: Vec<Region>,
    pub categories: Vec<Category>,
    list_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl StaticDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_camp_areas(mut self, camp_areas: Vec<CampArea>) -> Self {
        self.camp_areas = camp_areas;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Number of list requests received so far, failed ones included.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// While set, list requests fail with a 503 as an unreachable backend
    /// would. Lookups and `get_event` keep working.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn select<T: Searchable + Clone>(
        &self,
        records: &[T],
        query: &ListQuery,
    ) -> Result<Vec<T>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 503,
                body: "backend unavailable".to_string(),
            });
        }
        let filters = FilterState {
            query: String::new(),
            region_id: query.region_id.clone(),
            category_id: query.category_id.clone(),
        };
        Ok(records
            .iter()
            .filter(|r| matches(*r, &filters))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DataProvider for StaticDataProvider {
    async fn list_activities(&self, query: &ListQuery) -> Result<Vec<Activity>, ClientError> {
        self.select(&self.activities, query)
    }

    async fn list_camp_areas(&self, query: &ListQuery) -> Result<Vec<CampArea>, ClientError> {
        self.select(&self.camp_areas, query)
    }

    async fn list_events(&self, query: &ListQuery) -> Result<Vec<Event>, ClientError> {
        self.select(&self.events, query)
    }

    async fn get_event(&self, id: &str) -> Result<Event, ClientError> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                entity: "event",
                id: id.to_string(),
            })
    }

    async fn list_regions(&self) -> Result<Vec<Region>, ClientError> {
        Ok(self.regions.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        Ok(self.categories.clone())
    }
}
