//! REST client for the Yurucamp backend API.
//!
//! Wraps the backend's read endpoints using [`reqwest`]. Region and category
//! filters travel as `regionId` / `categoryId` query parameters.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use yurucamp_core::filter::ListQuery;
use yurucamp_core::models::{Activity, CampArea, Category, Event, Region};

use crate::error::ClientError;
use crate::provider::{DataProvider, SessionProvider};

/// HTTP data provider for one backend.
pub struct HttpDataProvider {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionProvider>,
}

impl HttpDataProvider {
    /// Create a provider for the API rooted at `base_url`,
    /// e.g. `http://localhost:8080/api`.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionProvider>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, session))
    }

    /// Create a provider reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL below the base. Each segment is percent-encoded, so an
    /// id containing `/` or `?` stays a single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = self.url(segments)?;
        tracing::debug!(path = url.path(), ?query, "Backend GET");

        let mut request = self.client.get(url).query(query);
        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::parse_response(response).await
    }

    /// Check status and decode the JSON body.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &ListQuery,
    ) -> Result<Vec<T>, ClientError> {
        self.get_json(&[resource], &query.to_query_pairs()).await
    }
}

#[async_trait]
impl DataProvider for HttpDataProvider {
    async fn list_activities(&self, query: &ListQuery) -> Result<Vec<Activity>, ClientError> {
        self.list("activities", query).await
    }

    async fn list_camp_areas(&self, query: &ListQuery) -> Result<Vec<CampArea>, ClientError> {
        self.list("camp-areas", query).await
    }

    async fn list_events(&self, query: &ListQuery) -> Result<Vec<Event>, ClientError> {
        self.list("events", query).await
    }

    async fn get_event(&self, id: &str) -> Result<Event, ClientError> {
        match self.get_json(&["events", id], &[]).await {
            Err(ClientError::Api { status: 404, .. }) => Err(ClientError::NotFound {
                entity: "event",
                id: id.to_string(),
            }),
            other => other,
        }
    }

    async fn list_regions(&self) -> Result<Vec<Region>, ClientError> {
        self.get_json(&["regions"], &[]).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get_json(&["categories"], &[]).await
    }
}
