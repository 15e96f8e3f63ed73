//! Read-only snapshots of backend records.
//!
//! The backend serializes camelCase JSON; optional fields may be missing or
//! `null`. Nothing in this crate mutates these records.

use serde::{Deserialize, Serialize};

use crate::filter::Searchable;
use crate::types::{EntityId, Timestamp};

/// Owner of a post, as embedded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: EntityId,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

/// A trip report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub region_id: Option<EntityId>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A camp-area listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampArea {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub region_id: Option<EntityId>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub region: Option<Region>,
}

/// A user who joined an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: EntityId,
    pub user_id: EntityId,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// An organized meetup that users can join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub region_id: Option<EntityId>,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub start_at: Option<Timestamp>,
    #[serde(default)]
    pub end_at: Option<Timestamp>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

fn user_name(user: &Option<UserSummary>) -> Option<&str> {
    user.as_ref().map(|u| u.display_name.as_str())
}

fn region_name(region: &Option<Region>) -> Option<&str> {
    region.as_ref().map(|r| r.name.as_str())
}

impl Searchable for Activity {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title.as_str()),
            self.location.as_deref(),
            self.description.as_deref(),
            user_name(&self.user),
            region_name(&self.region),
        ]
    }

    fn region_id(&self) -> Option<&str> {
        self.region_id.as_deref()
    }

    fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }
}

impl Searchable for CampArea {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.location.as_deref(),
            self.address.as_deref(),
            self.description.as_deref(),
            user_name(&self.user),
            region_name(&self.region),
        ]
    }

    fn region_id(&self) -> Option<&str> {
        self.region_id.as_deref()
    }

    fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }
}

impl Searchable for Event {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title.as_str()),
            self.location.as_deref(),
            self.description.as_deref(),
            user_name(&self.user),
            region_name(&self.region),
        ]
    }

    fn region_id(&self) -> Option<&str> {
        self.region_id.as_deref()
    }

    fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }
}

impl Searchable for Participant {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.display_name.as_str())]
    }
}
