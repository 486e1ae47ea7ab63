//! DTOs for link reporting endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::LinkDetails;
use crate::domain::entities::{ClickEvent, LinkRecord};

/// One link as shown in reports.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub id: Uuid,
    pub code: String,
    pub long_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expired: bool,
    pub click_count: i64,
}

impl LinkItem {
    /// Builds the report row, judging expiry at `now`.
    pub fn from_record(record: LinkRecord, short_url: String, now: DateTime<Utc>) -> Self {
        Self {
            expired: record.is_expired_at(now),
            id: record.id,
            code: record.short_code,
            long_url: record.long_url,
            short_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            click_count: record.click_count,
        }
    }
}

/// Response for `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub total: usize,
    pub items: Vec<LinkItem>,
}

/// A single logged click.
#[derive(Debug, Serialize)]
pub struct ClickItem {
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub location: Option<String>,
}

impl From<ClickEvent> for ClickItem {
    fn from(event: ClickEvent) -> Self {
        Self {
            clicked_at: event.clicked_at,
            referrer: event.referrer,
            location: event.location,
        }
    }
}

/// Response for `GET /api/links/{code}`.
#[derive(Debug, Serialize)]
pub struct LinkDetailsResponse {
    pub link: LinkItem,
    pub clicks: Vec<ClickItem>,
}

impl LinkDetailsResponse {
    pub fn new(details: LinkDetails, short_url: String, now: DateTime<Utc>) -> Self {
        Self {
            link: LinkItem::from_record(details.link, short_url, now),
            clicks: details.clicks.into_iter().map(ClickItem::from).collect(),
        }
    }
}
