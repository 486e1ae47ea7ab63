//! Link record entity representing a time-limited short link.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// A short code mapped to a long URL for a limited validity window.
///
/// `long_url` holds the caller's raw input; scheme normalization happens
/// only when the link is resolved. Expiry is a read-time predicate, the
/// record itself is never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: Uuid,
    pub long_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: i64,
}

impl LinkRecord {
    /// Creates a fresh record valid for `validity` starting at `now`.
    ///
    /// The id is assigned here and the click counter starts at zero.
    /// Callers are responsible for passing a positive `validity`.
    pub fn new(
        long_url: impl Into<String>,
        short_code: impl Into<String>,
        validity: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            long_url: long_url.into(),
            short_code: short_code.into(),
            created_at: now,
            expires_at: now + validity,
            click_count: 0,
        }
    }

    /// Returns true if the link is no longer valid at `now`.
    ///
    /// The link is still valid at the exact `expires_at` instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
