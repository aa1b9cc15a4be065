//! Submit → redirect → one-time latest view.

use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;

use crate::common::TestHarness;

const VALID: &str = "produkt=https%3A%2F%2Fshop.example%2Flaptop&preis=1200&region=Z%C3%BCrich";

#[tokio::test]
async fn test_valid_submission_redirects_with_flash_token() {
    let harness = TestHarness::new();

    let resp = harness.post_form("/submit", VALID).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let location = resp.location().expect("redirect location");
    assert!(location.starts_with("/latest?flash="));
    assert_eq!(harness.record_count(), 1);
}

#[tokio::test]
async fn test_latest_shows_record_exactly_once() {
    let harness = TestHarness::new();
    let resp = harness.post_form("/submit", VALID).await;
    let location = resp.location().unwrap().to_string();

    let first = harness.get(&location).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(
        first.json,
        json!({
            "rows": [{
                "produkt": "https://shop.example/laptop",
                "preis": "1200",
                "region": "Zürich",
                "link": "https://shop.example/laptop",
            }],
            "message": "1 new entry was saved.",
            "success": true,
            "show_all_link": true,
        })
    );

    let second = harness.get(&location).await;
    assert_eq!(second.status, StatusCode::SEE_OTHER);
    assert_eq!(second.location(), Some("/results"));
}

#[tokio::test]
async fn test_missing_field_rejected_without_write() {
    let harness = TestHarness::new();
    harness.post_form("/submit", VALID).await;

    let resp = harness
        .post_form("/submit", "produkt=Lampe&preis=&region=Bern")
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.json["message"], "Please fill in all fields.");
    assert_eq!(resp.json["success"], false);
    assert_eq!(resp.json["fields"], json!(["Preis"]));
    assert_eq!(harness.record_count(), 1);
}

#[tokio::test]
async fn test_absent_keys_rejected() {
    let harness = TestHarness::new();
    let resp = harness.post_form("/submit", "region=Bern").await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.json["code"], "VALIDATION_FAILED");
    assert!(!harness.state.store.path().exists());
}

#[tokio::test]
async fn test_non_integer_price_rejected_without_write() {
    let harness = TestHarness::new();
    let resp = harness
        .post_form("/submit", "produkt=Lampe&preis=12.50&region=Bern")
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.json["fields"], json!(["Preis"]));
    assert_eq!(harness.record_count(), 0);
}

#[tokio::test]
async fn test_latest_without_token_redirects_to_results() {
    let harness = TestHarness::new();
    for uri in ["/latest", "/latest?flash=not-a-uuid", "/latest?flash=6f1c8d2e-3b7a-4c55-9e1f-0a2b3c4d5e6f"] {
        let resp = harness.get(uri).await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(resp.location(), Some("/results"));
    }
}

#[tokio::test]
async fn test_expired_token_redirects_to_results() {
    let harness = TestHarness::with_ttl(Duration::from_millis(5));
    let resp = harness.post_form("/submit", VALID).await;
    let location = resp.location().unwrap().to_string();

    tokio::time::sleep(Duration::from_millis(20)).await;
    let resp = harness.get(&location).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(harness.record_count(), 1);
}
