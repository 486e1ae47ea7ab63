//! Handlers for link reporting endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use crate::api::dto::links::{LinkDetailsResponse, LinkItem, LinkListResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every link, newest first, including expired ones.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let now = Utc::now();
    let records = state.stats_service.list_links().await?;

    let items: Vec<LinkItem> = records
        .into_iter()
        .map(|record| {
            let short_url = state.link_service.short_url(&record.short_code);
            LinkItem::from_record(record, short_url, now)
        })
        .collect();

    Ok(Json(LinkListResponse {
        total: items.len(),
        items,
    }))
}

/// Returns one link and its click log, newest click first.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn link_details_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkDetailsResponse>, AppError> {
    let details = state.stats_service.link_details(&code).await?;
    let short_url = state.link_service.short_url(&details.link.short_code);

    Ok(Json(LinkDetailsResponse::new(details, short_url, Utc::now())))
}
