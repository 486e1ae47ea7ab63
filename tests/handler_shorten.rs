mod common;

use ephemeral_links::domain::repositories::UrlStore;
use serde_json::{Value, json};

#[tokio::test]
async fn test_shorten_single_url() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "urls": [{ "long_url": "https://example.com/page" }] }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["summary"]["total"], 1);
    assert_eq!(body["summary"]["successful"], 1);
    assert_eq!(body["summary"]["failed"], 0);

    let item = &body["items"][0];
    let code = item["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(item["long_url"], "https://example.com/page");
    assert_eq!(item["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert!(item["expires_at"].is_string());
}

#[tokio::test]
async fn test_shorten_with_custom_code_and_validity() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({
            "urls": [{
                "long_url": "https://example.com",
                "custom_code": "launch-day",
                "validity_minutes": 120
            }]
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["items"][0]["code"], "launch-day");

    let stored = app.store.get_by_code("launch-day").await.unwrap().unwrap();
    assert_eq!(
        stored.expires_at - stored.created_at,
        chrono::Duration::minutes(120)
    );
}

#[tokio::test]
async fn test_batch_partial_success() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                { "long_url": "https://one.example" },
                { "long_url": "not a url" },
                { "long_url": "https://three.example" }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["summary"]["total"], 3);
    assert_eq!(body["summary"]["successful"], 2);
    assert_eq!(body["summary"]["failed"], 1);

    assert!(body["items"][0]["code"].is_string());
    assert_eq!(body["items"][1]["long_url"], "not a url");
    assert_eq!(body["items"][1]["error"]["code"], "validation_error");
    assert!(body["items"][2]["code"].is_string());
}

#[tokio::test]
async fn test_duplicate_custom_code_in_batch() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                { "long_url": "https://first.example", "custom_code": "abc123" },
                { "long_url": "https://second.example", "custom_code": "abc123" }
            ]
        }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["summary"]["successful"], 1);
    assert_eq!(body["items"][1]["error"]["code"], "conflict");

    let stored = app.store.get_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(stored.long_url, "https://first.example");
}

#[tokio::test]
async fn test_invalid_custom_code_reported_per_item() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                { "long_url": "https://example.com", "custom_code": "has space" },
                { "long_url": "https://example.com", "custom_code": "api" }
            ]
        }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["summary"]["failed"], 2);
    assert_eq!(body["items"][0]["error"]["code"], "validation_error");
    assert_eq!(body["items"][1]["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_out_of_range_validity_reported_per_item() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({
            "urls": [{ "long_url": "https://example.com", "validity_minutes": 0 }]
        }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["summary"]["failed"], 1);
    assert_eq!(body["items"][0]["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_more_than_five_urls_rejected() {
    let app = common::spawn_app();
    let urls: Vec<Value> = (0..6)
        .map(|i| json!({ "long_url": format!("https://example.com/{i}") }))
        .collect();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "urls": urls }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(app.store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_batch_rejected() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({ "urls": [] }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_whitespace_in_long_url_rejected() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/shorten")
        .json(&json!({
            "urls": [
                { "long_url": " https://example.com/path", "custom_code": "sp" },
                { "long_url": "https://example.com/a\nb", "custom_code": "nl" }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["summary"]["successful"], 0);
    assert_eq!(body["summary"]["failed"], 2);
    assert_eq!(body["items"][0]["error"]["code"], "validation_error");
    assert_eq!(body["items"][1]["error"]["code"], "validation_error");

    assert!(app.store.get_by_code("sp").await.unwrap().is_none());
    assert!(app.store.get_by_code("nl").await.unwrap().is_none());
    assert_eq!(app.server.get("/sp").await.status_code(), 404);
    assert_eq!(app.server.get("/nl").await.status_code(), 404);
}
