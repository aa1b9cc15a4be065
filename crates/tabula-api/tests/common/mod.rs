//! Common test utilities for driving the Tabula router in-process.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use tabula_api::{AppState, FlashStore, SubmissionPolicy, router};
use tabula_core::{FormConfig, Schema};
use tabula_storage::RowStore;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a store in a temporary directory.
pub struct TestHarness {
    /// Keeps the store directory alive
    pub dir: TempDir,
    /// State shared with the router
    pub state: AppState,
    /// Router under test
    pub app: Router,
}

/// A buffered response.
pub struct TestResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body parsed as JSON, `Null` when empty
    pub json: serde_json::Value,
}

impl TestResponse {
    /// `Location` header value, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestHarness {
    /// Harness with the default product form.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(60))
    }

    /// Harness whose flash tokens expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        let dir = TempDir::new().unwrap();
        let store = RowStore::new(dir.path().join("data.csv"), Schema::default());
        let policy = SubmissionPolicy::from_config(Schema::default(), &FormConfig::default());
        let state = AppState::new(store, policy, FlashStore::new(ttl));
        let app = router(state.clone());
        Self { dir, state, app }
    }

    /// Issue a GET.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    /// Issue a URL-encoded form POST.
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }

    /// Number of stored records.
    pub fn record_count(&self) -> usize {
        self.state.store.load_all().unwrap().len()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            json,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
