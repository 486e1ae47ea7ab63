//! Reporting over stored links and their click logs.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, LinkRecord};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;

/// A link together with its click log, newest click first.
#[derive(Debug, Clone)]
pub struct LinkDetails {
    pub link: LinkRecord,
    pub clicks: Vec<ClickEvent>,
}

/// Read-only reporting service.
///
/// Expired links are included: expiry only matters when resolving.
pub struct StatsService<S: UrlStore + ?Sized = dyn UrlStore> {
    store: Arc<S>,
}

impl<S: UrlStore + ?Sized> StatsService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns every link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage failures.
    pub async fn list_links(&self) -> Result<Vec<LinkRecord>, AppError> {
        Ok(self.store.list_all().await?)
    }

    /// Returns one link and its click events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `code`.
    /// Returns [`AppError::Store`] on storage failures.
    pub async fn link_details(&self, code: &str) -> Result<LinkDetails, AppError> {
        let link = self
            .store
            .get_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        let clicks = self.store.click_events(link.id).await?;

        Ok(LinkDetails { link, clicks })
    }
}
