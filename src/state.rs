//! Shared application state for HTTP handlers.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::services::{
    CodeGenerator, LinkService, RedirectResolver, StatsService,
};
use crate::config::Config;
use crate::domain::repositories::UrlStore;
use crate::domain::visit::Visit;

/// Application state shared across all HTTP handlers.
///
/// Cloned into each request; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UrlStore>,
    pub link_service: Arc<LinkService>,
    pub resolver: Arc<RedirectResolver>,
    pub stats_service: Arc<StatsService>,
    /// Sender half of the visit queue, kept for health reporting.
    pub click_sender: mpsc::Sender<Visit>,
    /// Upper bound for shorten and resolve calls.
    pub operation_timeout: Duration,
    /// Public origin, used for the "back" link on error pages.
    pub base_url: String,
}

impl AppState {
    /// Wires the services around `store` and the visit queue.
    pub fn new(store: Arc<dyn UrlStore>, click_sender: mpsc::Sender<Visit>, config: &Config) -> Self {
        let generator = CodeGenerator::from_entropy(store.clone())
            .with_max_attempts(config.code_max_attempts);

        let link_service = LinkService::new(store.clone(), generator, config.base_url.clone())
            .with_default_validity(config.default_validity_minutes)
            .with_operation_timeout(config.operation_timeout());

        Self {
            link_service: Arc::new(link_service),
            resolver: Arc::new(RedirectResolver::new(store.clone(), click_sender.clone())),
            stats_service: Arc::new(StatsService::new(store.clone())),
            store,
            click_sender,
            operation_timeout: config.operation_timeout(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}
