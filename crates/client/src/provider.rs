//! Injected collaborators: where records come from and who is asking.

use async_trait::async_trait;
use yurucamp_core::filter::{ListQuery, Searchable};
use yurucamp_core::models::{Activity, CampArea, Category, Event, Region};

use crate::error::ClientError;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Supplies credentials for backend requests.
pub trait SessionProvider: Send + Sync {
    /// Bearer token of the signed-in user, if any.
    fn access_token(&self) -> Option<String>;
}

/// A session whose token never changes.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

/// Read access to the backend's community records.
///
/// List operations take the server-side half of the filter; free-text search
/// is never sent to the backend.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn list_activities(&self, query: &ListQuery) -> Result<Vec<Activity>, ClientError>;

    async fn list_camp_areas(&self, query: &ListQuery) -> Result<Vec<CampArea>, ClientError>;

    async fn list_events(&self, query: &ListQuery) -> Result<Vec<Event>, ClientError>;

    /// One event including its participant list.
    async fn get_event(&self, id: &str) -> Result<Event, ClientError>;

    async fn list_regions(&self) -> Result<Vec<Region>, ClientError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;
}

/// A record type that has its own list endpoint.
#[async_trait]
pub trait ListResource: Searchable + Clone + Send + Sync + Sized + 'static {
    /// Name used in logs.
    const RESOURCE: &'static str;

    async fn fetch(
        provider: &dyn DataProvider,
        query: &ListQuery,
    ) -> Result<Vec<Self>, ClientError>;
}

#[async_trait]
impl ListResource for Activity {
    const RESOURCE: &'static str = "activities";

    async fn fetch(
        provider: &dyn DataProvider,
        query: &ListQuery,
    ) -> Result<Vec<Self>, ClientError> {
        provider.list_activities(query).await
    }
}

#[async_trait]
impl ListResource for CampArea {
    const RESOURCE: &'static str = "camp_areas";

    async fn fetch(
        provider: &dyn DataProvider,
        query: &ListQuery,
    ) -> Result<Vec<Self>, ClientError> {
        provider.list_camp_areas(query).await
    }
}

#[async_trait]
impl ListResource for Event {
    const RESOURCE: &'static str = "events";

    async fn fetch(
        provider: &dyn DataProvider,
        query: &ListQuery,
    ) -> Result<Vec<Self>, ClientError> {
        provider.list_events(query).await
    }
}
