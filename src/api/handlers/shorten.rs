//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{BatchSummary, ShortenRequest, ShortenResponse, ShortenResultItem};
use crate::application::services::NewLink;
use crate::error::AppError;
use crate::state::AppState;

/// Creates short links for one to five long URLs.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Batch Processing
///
/// Items are processed independently. A failing item is reported in its
/// slot of the `items` array while the others are still created.
///
/// # Request Body
///
/// ```json
/// {
///   "urls": [
///     {
///       "long_url": "https://example.com",
///       "validity_minutes": 60,      // optional, default 30
///       "custom_code": "my-link"     // optional
///     }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 1, "successful": 1, "failed": 0 },
///   "items": [
///     {
///       "long_url": "https://example.com",
///       "code": "my-link",
///       "short_url": "https://s.example.com/my-link",
///       "expires_at": "2025-01-01T13:00:00Z"
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the batch is empty or has more than 5 items.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let long_urls: Vec<String> = payload.urls.iter().map(|u| u.long_url.clone()).collect();
    let requests: Vec<NewLink> = payload.urls.into_iter().map(NewLink::from).collect();

    let results = state.link_service.shorten_batch(requests).await?;

    let total = results.len();
    let mut items = Vec::with_capacity(total);
    let mut successful = 0;
    let mut failed = 0;

    for (long_url, result) in long_urls.into_iter().zip(results) {
        match result {
            Ok(record) => {
                successful += 1;
                items.push(ShortenResultItem::Success {
                    long_url,
                    short_url: state.link_service.short_url(&record.short_code),
                    code: record.short_code,
                    expires_at: record.expires_at,
                });
            }
            Err(err) => {
                failed += 1;
                items.push(ShortenResultItem::Error {
                    long_url,
                    error: err.to_error_info(),
                });
            }
        }
    }

    Ok(Json(ShortenResponse {
        summary: BatchSummary {
            total,
            successful,
            failed,
        },
        items,
    }))
}
