//! Classification of sqlx failures into store errors.

use crate::domain::errors::StoreError;

/// Name of the unique constraint guarding `urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "urls_short_code_key";

/// Name of the foreign key from `click_logs.url_id` to `urls.id`.
pub const CLICK_LINK_CONSTRAINT: &str = "click_logs_url_id_fkey";

/// Returns true if `e` is a unique violation on the short code column.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}

/// Returns true if `e` is a foreign key violation on the click log.
pub fn is_missing_link(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|db_err| {
        db_err.is_foreign_key_violation() && db_err.constraint() == Some(CLICK_LINK_CONSTRAINT)
    })
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}
