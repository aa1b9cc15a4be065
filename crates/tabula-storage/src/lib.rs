//! # tabula-storage
//!
//! Flat-file persistence for Tabula.
//!
//! - [`RowStore`]: append-only CSV file with a fixed header, created lazily
//!   on first write
//! - [`loader`]: reads the file back into ordered records for display

#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod store;

pub use error::{Error, Result};
pub use store::RowStore;
