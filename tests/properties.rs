//! Behavioral guarantees of the core services, checked against the
//! in-memory store.

use chrono::{Duration, Utc};
use ephemeral_links::application::services::{
    CodeGenerator, LinkService, NewLink, RedirectResolver,
};
use ephemeral_links::domain::entities::LinkRecord;
use ephemeral_links::domain::errors::ResolutionError;
use ephemeral_links::domain::repositories::UrlStore;
use ephemeral_links::domain::visit::VisitContext;
use ephemeral_links::error::AppError;
use ephemeral_links::infrastructure::persistence::InMemoryUrlStore;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

fn link_service(store: Arc<InMemoryUrlStore>) -> LinkService<InMemoryUrlStore> {
    let generator = CodeGenerator::from_entropy(store.clone());
    LinkService::new(store, generator, "https://s.example.com")
}

fn resolver(store: Arc<InMemoryUrlStore>) -> RedirectResolver<InMemoryUrlStore> {
    let (tx, _rx) = mpsc::channel(16);
    RedirectResolver::new(store, tx)
}

#[tokio::test]
async fn test_generated_codes_are_unique() {
    let store = Arc::new(InMemoryUrlStore::new());
    let service = link_service(store.clone());

    let mut codes = HashSet::new();
    for i in 0..500 {
        let record = service
            .shorten(NewLink::new(format!("https://example.com/{i}")))
            .await
            .unwrap();
        assert!(codes.insert(record.short_code));
    }

    assert_eq!(store.list_all().await.unwrap().len(), 500);
}

#[tokio::test]
async fn test_concurrent_shorten_yields_unique_codes() {
    let store = Arc::new(InMemoryUrlStore::new());
    let service = Arc::new(link_service(store.clone()));

    let mut handles = Vec::new();
    for i in 0..50 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .shorten(NewLink::new(format!("https://example.com/{i}")))
                .await
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        assert!(codes.insert(record.short_code));
    }
    assert_eq!(codes.len(), 50);
}

#[tokio::test]
async fn test_shorten_then_resolve_returns_target() {
    let store = Arc::new(InMemoryUrlStore::new());
    let record = link_service(store.clone())
        .shorten(NewLink::new("https://example.com/landing?utm=x"))
        .await
        .unwrap();

    let target = resolver(store)
        .resolve(&record.short_code, VisitContext::default())
        .await
        .unwrap();

    assert_eq!(target, "https://example.com/landing?utm=x");
}

#[tokio::test]
async fn test_expiry_boundary() {
    let store = Arc::new(InMemoryUrlStore::new());
    let created = Utc::now();
    let record = LinkRecord::new("https://example.com", "edge", Duration::minutes(1), created);
    store.insert(record.clone()).await.unwrap();
    let resolver = resolver(store);

    let at_expiry = resolver
        .resolve_at("edge", VisitContext::default(), record.expires_at)
        .await;
    assert!(at_expiry.is_ok());

    let after = resolver
        .resolve_at(
            "edge",
            VisitContext::default(),
            record.expires_at + Duration::milliseconds(1),
        )
        .await;
    assert!(matches!(after, Err(ResolutionError::Expired { .. })));
}

#[tokio::test]
async fn test_custom_code_conflict_leaves_existing_untouched() {
    let store = Arc::new(InMemoryUrlStore::new());
    let service = link_service(store.clone());

    let first = service
        .shorten(NewLink::new("https://first.example").with_custom_code("promo"))
        .await
        .unwrap();

    let err = service
        .shorten(NewLink::new("https://second.example").with_custom_code("promo"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    let stored = store.get_by_code("promo").await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.long_url, "https://first.example");
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_expired_code_is_not_reused() {
    let store = Arc::new(InMemoryUrlStore::new());
    let long_ago = Utc::now() - Duration::days(2);
    store
        .insert(LinkRecord::new(
            "https://old.example",
            "spring",
            Duration::minutes(5),
            long_ago,
        ))
        .await
        .unwrap();

    let err = link_service(store.clone())
        .shorten(NewLink::new("https://new.example").with_custom_code("spring"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    let stored = store.get_by_code("spring").await.unwrap().unwrap();
    assert_eq!(stored.long_url, "https://old.example");
}

#[tokio::test]
async fn test_batch_failures_are_isolated() {
    let store = Arc::new(InMemoryUrlStore::new());
    let service = link_service(store.clone());

    let results = service
        .shorten_batch(vec![
            NewLink::new("https://a.example").with_custom_code("same"),
            NewLink::new("https://b.example").with_custom_code("same"),
            NewLink::new("ftp://c.example"),
            NewLink::new("https://d.example").with_validity(0),
            NewLink::new("https://e.example").with_validity(60),
        ])
        .await
        .unwrap();

    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(AppError::Conflict { .. })));
    assert!(matches!(results[2], Err(AppError::Validation { .. })));
    assert!(matches!(results[3], Err(AppError::Validation { .. })));
    assert!(results[4].is_ok());

    assert_eq!(store.list_all().await.unwrap().len(), 2);
}
