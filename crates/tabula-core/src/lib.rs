//! Tabula Core: shared types, configuration, and errors.
//!
//! This crate has no internal Tabula dependencies. Storage and HTTP crates
//! build on the types defined here.
//!
//! # Modules
//!
//! - [`config`]: `TabulaConfig` and its TOML loading rules
//! - [`error`]: Error types and Result alias
//! - [`record`]: `Schema` (fixed field set) and `Record` (one stored row)

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod record;

pub use config::{FormConfig, ServerConfig, StoreConfig, TabulaConfig};
pub use error::{Error, Result};
pub use record::{Record, Schema};
