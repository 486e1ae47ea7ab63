#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use ephemeral_links::application::click_worker::run_click_worker;
use ephemeral_links::application::services::ClickTracker;
use ephemeral_links::config::Config;
use ephemeral_links::domain::entities::LinkRecord;
use ephemeral_links::domain::repositories::UrlStore;
use ephemeral_links::infrastructure::persistence::InMemoryUrlStore;
use ephemeral_links::routes::router;
use ephemeral_links::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const BASE_URL: &str = "https://s.example.com";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        listen_addr: "127.0.0.1:0".to_string(),
        base_url: BASE_URL.to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        click_queue_capacity: 1_000,
        click_worker_concurrency: 4,
        code_max_attempts: 10,
        default_validity_minutes: 30,
        operation_timeout_ms: 5_000,
        db_max_connections: 1,
        db_connect_timeout: 1,
        db_idle_timeout: 60,
        db_max_lifetime: 60,
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryUrlStore>,
    pub state: AppState,
    pub worker: JoinHandle<()>,
}

/// Full router over an in-memory store with a running click worker.
pub fn spawn_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(InMemoryUrlStore::new());
    let dyn_store: Arc<dyn UrlStore> = store.clone();

    let (tx, rx) = mpsc::channel(config.click_queue_capacity);
    let tracker = Arc::new(ClickTracker::new(dyn_store.clone()));
    let worker = tokio::spawn(run_click_worker(rx, tracker, config.click_worker_concurrency));

    let state = AppState::new(dyn_store, tx, &config);
    let server = TestServer::new(router(state.clone())).unwrap();

    TestApp {
        server,
        store,
        state,
        worker,
    }
}

pub async fn insert_link(
    store: &InMemoryUrlStore,
    code: &str,
    long_url: &str,
    expires_in: Duration,
) -> LinkRecord {
    let now = Utc::now();
    let mut record = LinkRecord::new(long_url, code, Duration::minutes(1), now);
    record.created_at = now.min(now + expires_in) - Duration::minutes(1);
    record.expires_at = now + expires_in;
    store.insert(record.clone()).await.unwrap();
    record
}

/// Polls until the link's counter reaches `expected` or a deadline passes.
pub async fn wait_for_clicks(store: &InMemoryUrlStore, code: &str, expected: i64) -> LinkRecord {
    for _ in 0..200 {
        let record = store.get_by_code(code).await.unwrap().unwrap();
        if record.click_count >= expected {
            return record;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    store.get_by_code(code).await.unwrap().unwrap()
}
