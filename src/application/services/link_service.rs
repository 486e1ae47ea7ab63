//! Link creation service.

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tracing::{info, warn};

use crate::application::services::CodeGenerator;
use crate::domain::entities::LinkRecord;
use crate::domain::errors::{GenerationError, StoreError};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;
use crate::utils::code_generator::validate_custom_code;
use crate::utils::deadline::within;
use crate::utils::url_normalizer::validate_long_url;

/// Largest number of items accepted in one batch.
pub const MAX_BATCH_SIZE: usize = 5;

/// Longest accepted validity: one year.
pub const MAX_VALIDITY_MINUTES: i64 = 525_600;

/// Default validity when the caller gives none.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// One link to create.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub long_url: String,
    pub validity_minutes: Option<i64>,
    pub custom_code: Option<String>,
}

impl NewLink {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            validity_minutes: None,
            custom_code: None,
        }
    }

    pub fn with_validity(mut self, minutes: i64) -> Self {
        self.validity_minutes = Some(minutes);
        self
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }
}

/// Service for creating short links.
///
/// Validates input before touching the store, asks the [`CodeGenerator`] for
/// a code, then performs the insert. The insert is the authoritative
/// uniqueness gate: a [`StoreError::DuplicateCode`] on an auto-generated code
/// triggers a fresh draw, while on a custom code it is reported as a
/// conflict.
pub struct LinkService<S: UrlStore + ?Sized = dyn UrlStore> {
    store: Arc<S>,
    generator: CodeGenerator<S>,
    base_url: String,
    default_validity_minutes: i64,
    operation_timeout: StdDuration,
}

impl<S: UrlStore + ?Sized> LinkService<S> {
    pub fn new(store: Arc<S>, generator: CodeGenerator<S>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            generator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            operation_timeout: StdDuration::from_secs(5),
        }
    }

    /// Overrides the validity used when a request gives none.
    pub fn with_default_validity(mut self, minutes: i64) -> Self {
        self.default_validity_minutes = minutes;
        self
    }

    /// Sets the time limit applied to each batch item.
    pub fn with_operation_timeout(mut self, limit: StdDuration) -> Self {
        self.operation_timeout = limit;
        self
    }

    /// Creates a single short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - The long URL is not an absolute HTTP(S) URL
    /// - The validity is outside `1..=525600` minutes
    /// - The custom code is malformed or reserved
    ///
    /// Returns [`AppError::Conflict`] if the custom code is already taken,
    /// including by an expired link.
    ///
    /// Returns [`AppError::Exhausted`] if no free random code was found.
    pub async fn shorten(&self, request: NewLink) -> Result<LinkRecord, AppError> {
        validate_long_url(&request.long_url)?;

        let minutes = request
            .validity_minutes
            .unwrap_or(self.default_validity_minutes);
        if !(1..=MAX_VALIDITY_MINUTES).contains(&minutes) {
            return Err(AppError::bad_request(
                "Validity must be between 1 and 525600 minutes",
                json!({ "validity_minutes": minutes }),
            ));
        }
        let validity = Duration::minutes(minutes);

        let record = match request.custom_code.filter(|c| !c.is_empty()) {
            Some(custom) => {
                validate_custom_code(&custom)?;
                let code = self.generator.generate(Some(custom.as_str())).await?;
                let record = LinkRecord::new(request.long_url, code, validity, Utc::now());
                self.store.insert(record.clone()).await?;
                record
            }
            None => self.insert_with_random_code(request.long_url, validity).await?,
        };

        metrics::counter!("links_created_total").increment(1);
        info!(
            code = %record.short_code,
            link_id = %record.id,
            expires_at = %record.expires_at,
            "Short link created"
        );

        Ok(record)
    }

    /// Creates up to [`MAX_BATCH_SIZE`] links, each independently.
    ///
    /// One failing item never affects the others, and each item gets its
    /// own time limit. The outer result only fails when the batch itself is
    /// empty or too large.
    pub async fn shorten_batch(
        &self,
        requests: Vec<NewLink>,
    ) -> Result<Vec<Result<LinkRecord, AppError>>, AppError> {
        if requests.is_empty() || requests.len() > MAX_BATCH_SIZE {
            return Err(AppError::bad_request(
                "A batch must contain between 1 and 5 URLs",
                json!({ "provided": requests.len(), "max": MAX_BATCH_SIZE }),
            ));
        }

        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            results.push(within(self.operation_timeout, "shorten", self.shorten(request)).await);
        }

        Ok(results)
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    async fn insert_with_random_code(
        &self,
        long_url: String,
        validity: Duration,
    ) -> Result<LinkRecord, AppError> {
        let attempts = self.generator.max_attempts();
        let mut remaining = attempts;

        while let Some(code) = self.generator.draw_unused(&mut remaining).await? {
            let record = LinkRecord::new(long_url.clone(), code, validity, Utc::now());

            match self.store.insert(record.clone()).await {
                Ok(()) => return Ok(record),
                Err(StoreError::DuplicateCode(code)) => {
                    warn!(code = %code, remaining, "Generated code lost insert race, drawing again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(GenerationError::Exhausted { attempts }.into())
    }
}
