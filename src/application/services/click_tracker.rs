//! Best-effort click accounting.

use std::sync::Arc;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error};

use crate::domain::entities::ClickEvent;
use crate::domain::errors::StoreError;
use crate::domain::repositories::UrlStore;
use crate::domain::visit::Visit;

/// Retries per write after the first attempt.
const MAX_RETRIES: usize = 3;

/// Result of recording one visit.
///
/// The two writes are independent, so any combination is possible. A
/// partial outcome leaves `click_count` and the event log out of step until
/// a later visit, which is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    pub event_logged: bool,
    pub counter_bumped: bool,
}

impl ClickOutcome {
    pub fn is_complete(&self) -> bool {
        self.event_logged && self.counter_bumped
    }
}

/// Appends click events and bumps click counters.
///
/// Each write is retried on transient [`StoreError::Backend`] failures with
/// jittered exponential backoff. Failures end up in logs and metrics only;
/// [`ClickTracker::record`] never returns an error.
pub struct ClickTracker<S: UrlStore + ?Sized = dyn UrlStore> {
    store: Arc<S>,
    backoff_unit_ms: u64,
}

impl<S: UrlStore + ?Sized> ClickTracker<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            backoff_unit_ms: 25,
        }
    }

    /// Scales the retry delays. The first retry waits about `2 * unit`
    /// milliseconds, doubling from there.
    pub fn with_backoff_unit(mut self, unit_ms: u64) -> Self {
        self.backoff_unit_ms = unit_ms;
        self
    }

    /// Records one visit: appends a [`ClickEvent`] and increments the
    /// link's counter.
    pub async fn record(&self, visit: &Visit) -> ClickOutcome {
        let event = ClickEvent::new(
            visit.link_id,
            visit.visited_at,
            visit.referrer.clone(),
            visit.location.clone(),
        );

        let logged = RetryIf::start(
            self.strategy(),
            || {
                let event = event.clone();
                async move { self.store.append_click_event(event).await }
            },
            StoreError::is_transient,
        )
        .await;

        let bumped = RetryIf::start(
            self.strategy(),
            || self.store.increment_clicks(visit.link_id),
            StoreError::is_transient,
        )
        .await;

        let outcome = ClickOutcome {
            event_logged: report(visit, "event", logged),
            counter_bumped: report(visit, "counter", bumped),
        };

        if outcome.is_complete() {
            metrics::counter!("clicks_recorded_total").increment(1);
            debug!(code = %visit.code, link_id = %visit.link_id, "Click recorded");
        }

        outcome
    }

    fn strategy(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(2)
            .factor(self.backoff_unit_ms)
            .map(jitter)
            .take(MAX_RETRIES)
    }
}

fn report(visit: &Visit, write: &'static str, result: Result<(), StoreError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            metrics::counter!("click_write_failures_total", "write" => write).increment(1);
            error!(
                operation = "record_click",
                write,
                code = %visit.code,
                link_id = %visit.link_id,
                visited_at = %visit.visited_at,
                error = %e,
                "Click write failed"
            );
            false
        }
    }
}
