//! Form contract, results tables and health.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::TestHarness;

#[tokio::test]
async fn test_form_contract() {
    let harness = TestHarness::new();
    for uri in ["/", "/form"] {
        let resp = harness.get(uri).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(
            resp.json,
            json!({
                "fields": ["produkt", "preis", "region", "link"],
                "required": ["produkt", "preis", "region"],
                "numeric": ["preis"],
            })
        );
    }
}

#[tokio::test]
async fn test_results_empty_before_first_write() {
    let harness = TestHarness::new();
    let resp = harness.get("/results").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json, json!({ "rows": [], "show_all_link": false }));
}

#[tokio::test]
async fn test_results_in_submission_order() {
    let harness = TestHarness::new();
    for (name, price) in [("Velo", "650"), ("Lampe", "89"), ("Tisch", "240")] {
        let body = format!("produkt={name}&preis={price}&region=Bern");
        let resp = harness.post_form("/submit", &body).await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
    }

    for uri in ["/results", "/search-results"] {
        let resp = harness.get(uri).await;
        let names: Vec<&str> = resp.json["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["produkt"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Velo", "Lampe", "Tisch"], "{uri}");
    }
}

#[tokio::test]
async fn test_results_reflect_direct_store_appends() {
    let harness = TestHarness::new();
    harness
        .state
        .store
        .append([("Produkt", "Laptop"), ("Preis", "1200"), ("Region", "Zürich")])
        .unwrap();

    let resp = harness.get("/results").await;
    assert_eq!(
        resp.json["rows"],
        json!([{ "produkt": "Laptop", "preis": "1200", "region": "Zürich", "link": "" }])
    );
}

#[tokio::test]
async fn test_health() {
    let harness = TestHarness::new();
    let resp = harness.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["status"], "healthy");
    assert_eq!(resp.json["name"], "tabula-api");
}

#[tokio::test]
async fn test_unknown_route() {
    let harness = TestHarness::new();
    let resp = harness.get("/admin").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
