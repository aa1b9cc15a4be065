//! # tabula-cli
//!
//! Command-line front end for Tabula: runs the HTTP server, prints stored
//! records, and manages the configuration file.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command, ConfigAction};
pub use error::{Error, Result};
