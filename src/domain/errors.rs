//! Domain error types shared by the store and the services built on it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Failures reported by a [`crate::domain::repositories::UrlStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The short code is already taken. Raised by the insert itself, so it
    /// is authoritative even when a prior existence check said otherwise.
    #[error("short code '{0}' is already taken")]
    DuplicateCode(String),

    #[error("link {0} does not exist")]
    UnknownLink(Uuid),

    /// Transient I/O or backend failure. Callers may retry the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns true for failures worth retrying at the operation boundary.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Backend(_))
    }
}

/// Failures while drawing a short code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("no free short code found after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Terminal failures of a single resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("short link '{code}' not found")]
    NotFound { code: String },

    #[error("short link '{code}' expired at {expired_at}")]
    Expired {
        code: String,
        expired_at: DateTime<Utc>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
