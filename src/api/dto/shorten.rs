//! DTOs for link shortening endpoint.

use crate::application::services::NewLink;
use crate::error::ErrorInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten one to five URLs.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 5, message = "Provide between 1 and 5 URLs"))]
    pub urls: Vec<UrlItem>,
}

/// Individual URL to be shortened.
///
/// Items are validated by the link service one by one, so a bad item is
/// reported in its own result slot instead of failing the request.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlItem {
    pub long_url: String,

    /// Lifetime in minutes. Defaults to the configured validity.
    pub validity_minutes: Option<i64>,

    pub custom_code: Option<String>,
}

impl From<UrlItem> for NewLink {
    fn from(item: UrlItem) -> Self {
        NewLink {
            long_url: item.long_url,
            validity_minutes: item.validity_minutes,
            custom_code: item.custom_code,
        }
    }
}

/// Response containing batch processing results.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub summary: BatchSummary,
    pub items: Vec<ShortenResultItem>,
}

/// Individual result for a URL in the batch.
///
/// Uses untagged enum for cleaner JSON structure (no discriminator field).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShortenResultItem {
    Success {
        long_url: String,
        code: String,
        short_url: String,
        expires_at: DateTime<Utc>,
    },
    Error {
        long_url: String,
        error: ErrorInfo,
    },
}

/// Summary statistics for batch processing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}
