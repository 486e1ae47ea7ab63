//! PostgreSQL implementation of the URL store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{ClickEvent, LinkRecord};
use crate::domain::errors::StoreError;
use crate::domain::repositories::UrlStore;
use crate::utils::db_error::{is_missing_link, is_unique_violation_on_code};

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: Uuid,
    long_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    click_count: i64,
}

impl From<UrlRow> for LinkRecord {
    fn from(r: UrlRow) -> Self {
        LinkRecord {
            id: r.id,
            long_url: r.long_url,
            short_code: r.short_code,
            created_at: r.created_at,
            expires_at: r.expires_at,
            click_count: r.click_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ClickLogRow {
    id: Uuid,
    url_id: Uuid,
    clicked_at: DateTime<Utc>,
    referrer: Option<String>,
    location: Option<String>,
}

impl From<ClickLogRow> for ClickEvent {
    fn from(r: ClickLogRow) -> Self {
        ClickEvent {
            id: r.id,
            link_id: r.url_id,
            clicked_at: r.clicked_at,
            referrer: r.referrer,
            location: r.location,
        }
    }
}

/// PostgreSQL store for link records and click logs.
///
/// Uniqueness of short codes is enforced by the `urls_short_code_key`
/// constraint, so concurrent inserts of the same code cannot both succeed.
/// The click counter is bumped with a single `UPDATE` statement.
pub struct PgUrlStore {
    pool: Arc<PgPool>,
}

impl PgUrlStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn insert(&self, record: LinkRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO urls (id, long_url, short_code, created_at, expires_at, click_count)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.long_url)
        .bind(&record.short_code)
        .bind(record.created_at)
        .bind(record.expires_at)
        .bind(record.click_count)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                StoreError::DuplicateCode(record.short_code.clone())
            } else {
                e.into()
            }
        })?;

        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<LinkRecord>, StoreError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, long_url, short_code, created_at, expires_at, click_count
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LinkRecord::from))
    }

    async fn list_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, long_url, short_code, created_at, expires_at, click_count
            FROM urls
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(LinkRecord::from).collect())
    }

    async fn increment_clicks(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE urls SET click_count = click_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UnknownLink(id));
        }

        Ok(())
    }

    async fn append_click_event(&self, event: ClickEvent) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO click_logs (id, url_id, clicked_at, referrer, location)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.id)
        .bind(event.link_id)
        .bind(event.clicked_at)
        .bind(&event.referrer)
        .bind(&event.location)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_missing_link(&e) {
                StoreError::UnknownLink(event.link_id)
            } else {
                e.into()
            }
        })?;

        Ok(())
    }

    async fn click_events(&self, link_id: Uuid) -> Result<Vec<ClickEvent>, StoreError> {
        let rows = sqlx::query_as::<_, ClickLogRow>(
            r#"
            SELECT id, url_id, clicked_at, referrer, location
            FROM click_logs
            WHERE url_id = $1
            ORDER BY clicked_at DESC
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ClickEvent::from).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
