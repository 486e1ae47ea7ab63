//! Expiry-aware resolution of short codes into redirect targets.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::entities::LinkRecord;
use crate::domain::errors::ResolutionError;
use crate::domain::repositories::UrlStore;
use crate::domain::visit::{Visit, VisitContext};
use crate::utils::url_normalizer::redirect_target;

/// Terminal states of a single resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    NotFound,
    Expired { expired_at: DateTime<Utc> },
    Valid(LinkRecord),
}

impl Resolution {
    /// Label used for the `resolutions_total` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::NotFound => "not_found",
            Resolution::Expired { .. } => "expired",
            Resolution::Valid(_) => "valid",
        }
    }
}

/// Classifies a lookup result against `now`.
///
/// A link is still valid at the exact instant of `expires_at`.
pub fn classify(record: Option<LinkRecord>, now: DateTime<Utc>) -> Resolution {
    match record {
        None => Resolution::NotFound,
        Some(record) if record.is_expired_at(now) => Resolution::Expired {
            expired_at: record.expires_at,
        },
        Some(record) => Resolution::Valid(record),
    }
}

/// Turns short codes into redirect targets.
///
/// # Flow
///
/// 1. Look the code up in the store
/// 2. Reject unknown and expired codes (expired records stay in place)
/// 3. Queue a [`Visit`] for the click worker with `try_send`
/// 4. Return the normalized target
///
/// Accounting never blocks or fails the redirect: if the queue is full or
/// closed the visit is dropped and counted in `clicks_dropped_total`.
pub struct RedirectResolver<S: UrlStore + ?Sized = dyn UrlStore> {
    store: Arc<S>,
    visits: mpsc::Sender<Visit>,
}

impl<S: UrlStore + ?Sized> RedirectResolver<S> {
    pub fn new(store: Arc<S>, visits: mpsc::Sender<Visit>) -> Self {
        Self { store, visits }
    }

    /// Resolves `code` against the current wall-clock time.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::NotFound`] if no record uses the code
    /// - [`ResolutionError::Expired`] if the record's expiry has passed
    /// - [`ResolutionError::Store`] if the lookup fails; not retried here
    pub async fn resolve(&self, code: &str, context: VisitContext) -> Result<String, ResolutionError> {
        self.resolve_at(code, context, Utc::now()).await
    }

    /// Resolves `code` as of `now`.
    pub async fn resolve_at(
        &self,
        code: &str,
        context: VisitContext,
        now: DateTime<Utc>,
    ) -> Result<String, ResolutionError> {
        let record = self.store.get_by_code(code).await?;
        let resolution = classify(record, now);

        metrics::counter!("resolutions_total", "outcome" => resolution.outcome()).increment(1);

        match resolution {
            Resolution::NotFound => {
                debug!(code = %code, "Short code not found");
                Err(ResolutionError::NotFound {
                    code: code.to_string(),
                })
            }
            Resolution::Expired { expired_at } => {
                debug!(code = %code, expired_at = %expired_at, "Short code expired");
                Err(ResolutionError::Expired {
                    code: code.to_string(),
                    expired_at,
                })
            }
            Resolution::Valid(record) => {
                let target = redirect_target(&record.long_url);
                self.enqueue(Visit::new(
                    record.id,
                    record.short_code,
                    context.referrer.as_deref(),
                    context.location,
                ));
                Ok(target)
            }
        }
    }

    fn enqueue(&self, visit: Visit) {
        match self.visits.try_send(visit) {
            Ok(()) => {}
            Err(TrySendError::Full(visit)) => {
                metrics::counter!("clicks_dropped_total", "reason" => "full").increment(1);
                warn!(code = %visit.code, link_id = %visit.link_id, "Click queue full, visit dropped");
            }
            Err(TrySendError::Closed(visit)) => {
                metrics::counter!("clicks_dropped_total", "reason" => "closed").increment(1);
                warn!(code = %visit.code, link_id = %visit.link_id, "Click queue closed, visit dropped");
            }
        }
    }
}
