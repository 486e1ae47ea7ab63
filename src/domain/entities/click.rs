//! Click event entity representing a single successful resolution.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An append-only visit log entry.
///
/// `link_id` references [`crate::domain::entities::LinkRecord::id`]; the
/// link does not keep a back-reference to its events. Both metadata fields
/// are optional since clients may send neither a referrer nor anything we
/// can derive a location from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub id: Uuid,
    pub link_id: Uuid,
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub location: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event with a fresh id.
    pub fn new(
        link_id: Uuid,
        clicked_at: DateTime<Utc>,
        referrer: Option<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            link_id,
            clicked_at,
            referrer,
            location,
        }
    }
}
