//! Visit message for asynchronous click accounting.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An in-memory record of a successful resolution, queued for accounting.
///
/// Sent from [`crate::application::services::RedirectResolver`] to the
/// background worker over a bounded channel, so the redirect never waits on
/// analytics writes.
///
/// # Usage Flow
///
/// 1. Created by the resolver once a link resolves as valid
/// 2. Sent to the channel with `try_send` (dropped if the queue is full)
/// 3. Picked up by [`crate::application::click_worker::run_click_worker`]
/// 4. Turned into a [`crate::domain::entities::ClickEvent`] plus a counter bump
#[derive(Debug, Clone)]
pub struct Visit {
    pub link_id: Uuid,
    pub code: String,
    pub visited_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub location: Option<String>,
}

impl Visit {
    /// Creates a visit stamped with the current time.
    pub fn new(
        link_id: Uuid,
        code: String,
        referrer: Option<&str>,
        location: Option<String>,
    ) -> Self {
        Self {
            link_id,
            code,
            visited_at: Utc::now(),
            referrer: referrer.map(|s| s.to_string()),
            location,
        }
    }
}

/// Request metadata captured at the redirect boundary.
///
/// Carried into the resolver so it can build a [`Visit`] without knowing
/// anything about HTTP.
#[derive(Debug, Clone, Default)]
pub struct VisitContext {
    pub referrer: Option<String>,
    pub location: Option<String>,
}
