//! In-memory implementation of the URL store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::domain::entities::{ClickEvent, LinkRecord};
use crate::domain::errors::StoreError;
use crate::domain::repositories::UrlStore;

#[derive(Default)]
struct Tables {
    urls: HashMap<Uuid, LinkRecord>,
    codes: HashMap<String, Uuid>,
    click_logs: Vec<ClickEvent>,
}

/// Process-local store used when no database is configured, and in tests.
///
/// A single lock guards both tables, which makes every individual operation
/// atomic: the code check and the insert happen under one write guard, and
/// the counter is bumped in place.
#[derive(Default)]
pub struct InMemoryUrlStore {
    tables: RwLock<Tables>,
}

impl InMemoryUrlStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn insert(&self, record: LinkRecord) -> Result<(), StoreError> {
        let mut tables = self.write()?;

        if tables.codes.contains_key(&record.short_code) {
            return Err(StoreError::DuplicateCode(record.short_code));
        }

        tables.codes.insert(record.short_code.clone(), record.id);
        tables.urls.insert(record.id, record);
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<LinkRecord>, StoreError> {
        let tables = self.read()?;

        Ok(tables
            .codes
            .get(code)
            .and_then(|id| tables.urls.get(id))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let tables = self.read()?;

        let mut records: Vec<LinkRecord> = tables.urls.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn increment_clicks(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.write()?;

        let record = tables
            .urls
            .get_mut(&id)
            .ok_or(StoreError::UnknownLink(id))?;
        record.click_count += 1;
        Ok(())
    }

    async fn append_click_event(&self, event: ClickEvent) -> Result<(), StoreError> {
        let mut tables = self.write()?;

        if !tables.urls.contains_key(&event.link_id) {
            return Err(StoreError::UnknownLink(event.link_id));
        }

        tables.click_logs.push(event);
        Ok(())
    }

    async fn click_events(&self, link_id: Uuid) -> Result<Vec<ClickEvent>, StoreError> {
        let tables = self.read()?;

        let mut events: Vec<ClickEvent> = tables
            .click_logs
            .iter()
            .filter(|e| e.link_id == link_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at));
        Ok(events)
    }

    async fn health_check(&self) -> bool {
        self.read().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(code: &str) -> LinkRecord {
        LinkRecord::new("https://example.com", code, Duration::minutes(30), Utc::now())
    }

    #[tokio::test]
    async fn test_insert_and_get_by_code() {
        let store = InMemoryUrlStore::new();
        let rec = record("abc123");
        store.insert(rec.clone()).await.unwrap();

        let found = store.get_by_code("abc123").await.unwrap();
        assert_eq!(found, Some(rec));
        assert!(store.get_by_code("zzz999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected_without_overwrite() {
        let store = InMemoryUrlStore::new();
        let original = record("abc123");
        store.insert(original.clone()).await.unwrap();

        let mut other = record("abc123");
        other.long_url = "https://other.com".to_string();
        let err = store.insert(other).await.unwrap_err();

        assert_eq!(err, StoreError::DuplicateCode("abc123".to_string()));
        assert_eq!(store.get_by_code("abc123").await.unwrap(), Some(original));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let store = InMemoryUrlStore::new();
        let now = Utc::now();
        for (i, code) in ["first", "second", "third"].iter().enumerate() {
            let rec = LinkRecord::new(
                "https://example.com",
                *code,
                Duration::minutes(5),
                now + Duration::seconds(i as i64),
            );
            store.insert(rec).await.unwrap();
        }

        let codes: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.short_code)
            .collect();
        assert_eq!(codes, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_increment_unknown_link() {
        let store = InMemoryUrlStore::new();
        let id = Uuid::new_v4();
        assert_eq!(
            store.increment_clicks(id).await.unwrap_err(),
            StoreError::UnknownLink(id)
        );
    }

    #[tokio::test]
    async fn test_append_requires_existing_link() {
        let store = InMemoryUrlStore::new();
        let event = ClickEvent::new(Uuid::new_v4(), Utc::now(), None, None);
        assert!(matches!(
            store.append_click_event(event).await.unwrap_err(),
            StoreError::UnknownLink(_)
        ));
    }

    #[tokio::test]
    async fn test_click_events_newest_first_and_scoped() {
        let store = InMemoryUrlStore::new();
        let a = record("aaaaaa");
        let b = record("bbbbbb");
        store.insert(a.clone()).await.unwrap();
        store.insert(b.clone()).await.unwrap();

        let now = Utc::now();
        let older = ClickEvent::new(a.id, now - Duration::seconds(10), None, None);
        let newer = ClickEvent::new(a.id, now, Some("https://ref.example".to_string()), None);
        store.append_click_event(older.clone()).await.unwrap();
        store.append_click_event(newer.clone()).await.unwrap();
        store
            .append_click_event(ClickEvent::new(b.id, now, None, None))
            .await
            .unwrap();

        let events = store.click_events(a.id).await.unwrap();
        assert_eq!(events, vec![newer, older]);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store = std::sync::Arc::new(InMemoryUrlStore::new());
        let rec = record("hot");
        let id = rec.id;
        store.insert(rec).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.increment_clicks(id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let found = store.get_by_code("hot").await.unwrap().unwrap();
        assert_eq!(found.click_count, 50);
    }
}
