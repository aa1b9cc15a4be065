//! HTTP routes.
//!
//! ```text
//! GET  /, /form        form contract (fields, required, numeric)
//! POST /submit         validate → append → 303 /latest?flash=<token>
//! GET  /latest         the just-submitted record, shown once
//! GET  /results        every stored record
//! GET  /search-results alternative results view, same data
//! GET  /health         liveness
//! ```

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tabula_core::Record;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::Result;
use crate::state::AppState;

/// Message shown with the one-time latest-entry view.
pub const SAVED_MESSAGE: &str = "1 new entry was saved.";

/// Where the latest-entry view sends callers with no valid token.
pub const RESULTS_PATH: &str = "/results";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form))
        .route("/form", get(form))
        .route("/submit", post(submit))
        .route("/latest", get(latest))
        .route(RESULTS_PATH, get(results))
        .route("/search-results", get(results))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Views
// ============================================================================

/// Form contract for clients that render the input form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormView {
    /// Form keys, in schema order
    pub fields: Vec<String>,
    /// Keys that must be filled
    pub required: Vec<String>,
    /// Keys that must hold whole numbers
    pub numeric: Vec<String>,
}

/// A table of records with optional status banner.
#[derive(Clone, Debug, Serialize)]
pub struct TableView {
    /// Records to display
    pub rows: Vec<Record>,
    /// Banner text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    /// Banner kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Whether to offer a link to the full table
    pub show_all_link: bool,
}

impl TableView {
    /// Every stored record, no banner.
    pub fn all(rows: Vec<Record>) -> Self {
        Self {
            rows,
            message: None,
            success: None,
            show_all_link: false,
        }
    }

    /// The single just-submitted record with a success banner.
    pub fn latest(record: Record) -> Self {
        Self {
            rows: vec![record],
            message: Some(SAVED_MESSAGE),
            success: Some(true),
            show_all_link: true,
        }
    }
}

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" when the server answers
    pub status: String,
    /// Crate name
    pub name: String,
    /// Crate version
    pub version: String,
}

/// Query of the latest-entry view.
#[derive(Debug, Deserialize)]
pub struct LatestParams {
    /// Token issued by `/submit`
    pub flash: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn form(State(state): State<AppState>) -> Json<FormView> {
    let lower = |names: &[String]| -> Vec<String> {
        names.iter().map(|n| n.to_lowercase()).collect()
    };
    Json(FormView {
        fields: lower(state.store.schema().fields()),
        required: lower(state.policy.required()),
        numeric: lower(state.policy.numeric()),
    })
}

async fn submit(
    State(state): State<AppState>,
    Form(input): Form<HashMap<String, String>>,
) -> Result<Redirect> {
    let values = match state.policy.validate(&input) {
        Ok(values) => values,
        Err(rejection) => {
            tracing::info!(%rejection, "submission rejected");
            return Err(rejection.into());
        }
    };

    let store = state.store.clone();
    let record = tokio::task::spawn_blocking(move || store.append(values)).await??;

    let token = state.flash.put(record);
    tracing::info!(%token, path = %state.store.path().display(), "submission stored");
    Ok(Redirect::to(&format!("/latest?flash={token}")))
}

async fn latest(State(state): State<AppState>, Query(params): Query<LatestParams>) -> Response {
    let record = params
        .flash
        .as_deref()
        .and_then(|t| Uuid::parse_str(t.trim()).ok())
        .and_then(|token| state.flash.take(&token));

    match record {
        Some(record) => Json(TableView::latest(record)).into_response(),
        None => Redirect::to(RESULTS_PATH).into_response(),
    }
}

async fn results(State(state): State<AppState>) -> Result<Json<TableView>> {
    let store = state.store.clone();
    let rows = tokio::task::spawn_blocking(move || store.load_all()).await??;
    Ok(Json(TableView::all(rows)))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
