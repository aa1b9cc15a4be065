//! Application configuration.
//!
//! [`TabulaConfig`] is loaded from TOML and passed explicitly to the store
//! and server at construction time. Resolution order for the file:
//!
//! 1. An explicit path (e.g. `--config`)
//! 2. The `TABULA_CONFIG` environment variable
//! 3. `<config dir>/tabula/config.toml`
//!
//! A missing default file yields the built-in defaults; a missing explicit
//! file is an error. `TABULA_*` environment overrides are applied after the
//! file is read.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{DEFAULT_FIELDS, Schema};

/// Project name used for directories and environment variable prefixes.
pub const PROJECT_NAME: &str = "tabula";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TABULA_CONFIG";

// ============================================================================
// Sections
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabulaConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Backing file and schema
    pub store: StoreConfig,
    /// Submission rules
    pub form: FormConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for a TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Backing file and field schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the comma-separated file
    pub path: PathBuf,
    /// Field names, in header order
    pub fields: Vec<String>,
    /// Column delimiter; must be a single ASCII character
    pub delimiter: char,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data_bootstrap.csv"),
            fields: DEFAULT_FIELDS.iter().map(|f| (*f).to_string()).collect(),
            delimiter: ',',
        }
    }
}

impl StoreConfig {
    /// Build the schema declared by `fields`.
    pub fn schema(&self) -> Result<Schema> {
        Schema::new(&self.fields)
    }

    /// The delimiter as the single byte the CSV codec expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() && !matches!(self.delimiter, '"' | '\n' | '\r') {
            Ok(self.delimiter as u8)
        } else {
            Err(Error::config(format!(
                "store.delimiter must be a single ASCII character other than a quote or newline, got {:?}",
                self.delimiter
            )))
        }
    }
}

/// Submission rules applied before anything is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Fields that must be present and non-blank
    pub required: Vec<String>,
    /// Fields whose value must parse as an integer
    pub numeric: Vec<String>,
    /// Lifetime of a one-time flash token, in seconds
    pub flash_ttl_secs: u64,
    /// Target field → source field copies filled when the target is absent
    pub derived: BTreeMap<String, String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            required: vec!["Produkt".into(), "Preis".into(), "Region".into()],
            numeric: vec!["Preis".into()],
            flash_ttl_secs: 300,
            derived: BTreeMap::from([("Link".to_string(), "Produkt".to_string())]),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl TabulaConfig {
    /// Default config file location for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve which config file to read.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolve_with(explicit, |key| std::env::var(key).ok()).map(|(path, _)| path)
    }

    /// Resolve the config file, reading variables through `lookup`.
    ///
    /// The flag is `true` when the path was named by the caller or by a
    /// non-blank `TABULA_CONFIG`, and `false` for the platform default.
    pub fn resolve_with<F>(explicit: Option<&str>, lookup: F) -> Option<(PathBuf, bool)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            return Some((PathBuf::from(path), true));
        }
        if let Some(path) = lookup(CONFIG_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            return Some((PathBuf::from(path), true));
        }
        Self::default_config_path().map(|path| (path, false))
    }

    /// Load, apply environment overrides, and validate.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// Like [`TabulaConfig::load`], reading variables through `lookup`.
    pub fn load_with<F>(explicit: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::resolve_with(explicit, &lookup) {
            Some((path, _)) if path.exists() => Self::from_file(&path)?,
            Some((path, true)) => {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            _ => {
                log::debug!("no config file found, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply `TABULA_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TABULA_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TABULA_SERVER_PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                Error::config(format!("TABULA_SERVER_PORT is not a valid port: {port}"))
            })?;
        }
        if let Some(path) = lookup("TABULA_STORE_PATH") {
            self.store.path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Check cross-section consistency.
    pub fn validate(&self) -> Result<()> {
        let schema = self.store.schema()?;
        self.store.delimiter_byte()?;

        for field in &self.form.required {
            if !schema.contains(field) {
                return Err(Error::config(format!(
                    "form.required names unknown field '{field}'"
                )));
            }
        }
        for field in &self.form.numeric {
            if !schema.contains(field) {
                return Err(Error::config(format!(
                    "form.numeric names unknown field '{field}'"
                )));
            }
        }
        for (target, source) in &self.form.derived {
            if !schema.contains(target) || !schema.contains(source) {
                return Err(Error::config(format!(
                    "form.derived maps '{source}' to '{target}', both must be schema fields"
                )));
            }
        }
        if self.form.flash_ttl_secs == 0 {
            return Err(Error::config("form.flash_ttl_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Flatten into `TABULA_*` environment variables.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        vec![
            ("TABULA_SERVER_HOST".into(), self.server.host.clone()),
            ("TABULA_SERVER_PORT".into(), self.server.port.to_string()),
            (
                "TABULA_STORE_PATH".into(),
                self.store.path.display().to_string(),
            ),
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================
