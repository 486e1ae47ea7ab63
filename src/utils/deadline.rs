//! Caller-supplied time bounds for store-backed operations.

use std::future::Future;
use std::time::Duration;

use serde_json::json;
use tracing::warn;

use crate::error::AppError;

/// Runs `fut` with a time limit.
///
/// On timeout the future is dropped and [`AppError::Timeout`] is returned.
/// Whatever the store already committed stays committed.
///
/// # Examples
///
/// ```ignore
/// let target = within(Duration::from_secs(5), "resolve", resolver.resolve(&code, ctx)).await?;
/// ```
pub async fn within<T, E, F>(limit: Duration, operation: &'static str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            warn!(
                operation,
                limit_ms = limit.as_millis() as u64,
                "operation timed out"
            );
            Err(AppError::timeout(
                "Operation timed out",
                json!({ "operation": operation, "limit_ms": limit.as_millis() as u64 }),
            ))
        }
    }
}
