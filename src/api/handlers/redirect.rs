//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_location::Visitor;
use crate::utils::deadline::within;
use crate::web::pages::RedirectErrorPage;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Capture referrer and client location from the request
/// 2. Resolve the code (bounded by the operation timeout)
/// 3. Return 307 Temporary Redirect to the normalized target
///
/// Click accounting happens in the background and never delays or fails
/// the redirect.
///
/// # Errors
///
/// Renders an HTML error page with a link back to the shortener:
/// - 404 if the code is unknown
/// - 410 if the link has expired
/// - 503/504 if the store is unavailable or slow
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Visitor(context): Visitor,
) -> Response {
    let resolved = within(
        state.operation_timeout,
        "resolve",
        state.resolver.resolve(&code, context),
    )
    .await;

    match resolved {
        Ok(target) => Redirect::temporary(&target).into_response(),
        Err(err) => {
            if err.status().is_server_error() {
                error!(operation = "resolve", code = %code, error = %err, "Redirect failed");
            }
            error_page(&state, &code, err)
        }
    }
}

fn error_page(state: &AppState, code: &str, err: AppError) -> Response {
    let (title, message) = match &err {
        AppError::NotFound { .. } => (
            "Link not found",
            format!("There is no short link called \"{code}\"."),
        ),
        AppError::Expired { .. } => (
            "Link expired",
            format!("The short link \"{code}\" is no longer valid."),
        ),
        _ => (
            "Something went wrong",
            "The link could not be opened right now. Please try again later.".to_string(),
        ),
    };

    let page = RedirectErrorPage {
        title,
        message,
        back_url: format!("{}/", state.base_url),
    };

    (err.status(), page).into_response()
}
