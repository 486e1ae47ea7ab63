//! Persistence contract for link records and their click log.

use crate::domain::entities::{ClickEvent, LinkRecord};
use crate::domain::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage boundary consumed by the code generator, the resolver and the
/// click tracker.
///
/// All concurrency safety lives behind this trait: implementations must make
/// the conditional insert, the counter increment and the event append each
/// atomic on their own. No cross-operation atomicity is expected.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryUrlStore`] - reference implementation
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Inserts a new record if its short code is free.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if any record, expired or not,
    /// already uses `record.short_code`. The existing record is left untouched.
    ///
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn insert(&self, record: LinkRecord) -> Result<(), StoreError>;

    /// Finds a record by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(LinkRecord))` if found, regardless of expiry
    /// - `Ok(None)` if not found
    async fn get_by_code(&self, code: &str) -> Result<Option<LinkRecord>, StoreError>;

    /// Returns every record, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<LinkRecord>, StoreError>;

    /// Adds one to the click counter of a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownLink`] if no record has this id.
    async fn increment_clicks(&self, id: Uuid) -> Result<(), StoreError>;

    /// Appends a click event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownLink`] if `event.link_id` does not
    /// reference an existing record.
    async fn append_click_event(&self, event: ClickEvent) -> Result<(), StoreError>;

    /// Returns the click events of one record, newest first.
    async fn click_events(&self, link_id: Uuid) -> Result<Vec<ClickEvent>, StoreError>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}
