//! API route configuration.

use crate::api::handlers::{link_details_handler, list_links_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create short links (1 to 5 per request)
/// - `GET  /links`         - All links, newest first
/// - `GET  /links/{code}`  - One link and its click log
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links", get(list_links_handler))
        .route("/links/{code}", get(link_details_handler))
}
