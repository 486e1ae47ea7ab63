//! Background consumer of the visit queue.

use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tracing::{info, warn};

use crate::application::services::ClickTracker;
use crate::domain::repositories::UrlStore;
use crate::domain::visit::Visit;

/// Drains `rx` and records each visit through `tracker`.
///
/// At most `concurrency` visits are recorded at once. Returns after the
/// channel is closed and every in-flight recording has finished, which lets
/// the server flush pending clicks on shutdown.
pub async fn run_click_worker<S>(
    mut rx: mpsc::Receiver<Visit>,
    tracker: Arc<ClickTracker<S>>,
    concurrency: usize,
) where
    S: UrlStore + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    info!(concurrency, "Click worker started");

    while let Some(visit) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            warn!("Click worker semaphore closed");
            break;
        };

        let tracker = tracker.clone();
        tokio::spawn(async move {
            let _permit = permit;
            tracker.record(&visit).await;
        });
    }

    if permits.acquire_many(concurrency as u32).await.is_err() {
        warn!("Click worker stopped before in-flight visits finished");
    }

    info!("Click worker stopped");
}
