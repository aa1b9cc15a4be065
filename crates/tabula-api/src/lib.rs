//! # tabula-api
//!
//! HTTP API server for the Tabula form store.
//!
//! This crate provides:
//! - Submission validation (required and numeric fields)
//! - One-time flash tokens for the post-redirect latest-entry view
//! - axum routes for the form, submit, latest and results views
//! - JSON error responses with stable error codes

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod flash;
pub mod routes;
pub mod server;
pub mod state;
pub mod submission;

pub use error::{Error, Result};
pub use flash::FlashStore;
pub use routes::router;
pub use server::Server;
pub use state::AppState;
pub use submission::{Rejection, SubmissionPolicy};
