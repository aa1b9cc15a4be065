//! Handler functions for `tabula config` commands.
//!
//! Every handler writes to the supplied writer instead of stdout directly.

use std::io::Write;
use std::path::PathBuf;

use tabula_core::config::PROJECT_NAME;
use tabula_core::{Error as CoreError, TabulaConfig};

use crate::cli::ConfigAction;
use crate::error::Result;

// ============================================================================
// Command dispatch
// ============================================================================

/// Run a config subcommand.
pub fn handle_config_command(
    config_path: Option<&str>,
    action: ConfigAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, out),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, out),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force, out),
        ConfigAction::Export { docker_env } => {
            let config = TabulaConfig::load(config_path)?;
            cmd_config_export(&config, docker_env, out)
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>, out: &mut impl Write) -> Result<()> {
    let path = TabulaConfig::resolve_config_path(config_path).ok_or_else(|| {
        CoreError::config("Could not determine config directory for this platform")
    })?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        tracing::warn!(
            "{} does not exist; run `{PROJECT_NAME} config init` to create it",
            path.display()
        );
    }
    Ok(())
}

/// Print a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str, out: &mut impl Write) -> Result<()> {
    let config = TabulaConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| CoreError::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => {
            writeln!(out, "{}", format_toml_value(val))?;
            Ok(())
        }
        None => Err(CoreError::config(format!("Key '{key}' not found in configuration")).into()),
    }
}

/// Write a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool, out: &mut impl Write) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => TabulaConfig::default_config_path()
            .ok_or_else(|| CoreError::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(CoreError::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        ))
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CoreError::io_with_path(e, parent))?;
    }

    let toml_str = TabulaConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| CoreError::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

/// Print overridable settings as environment variables.
pub fn cmd_config_export(
    config: &TabulaConfig,
    docker_env: bool,
    out: &mut impl Write,
) -> Result<()> {
    for (key, value) in config.to_env_vars() {
        if docker_env {
            writeln!(out, "--env {key}={value}")?;
        } else {
            writeln!(out, "{key}={value}")?;
        }
    }
    Ok(())
}

// ============================================================================
// TOML helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Format a TOML value for display.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_toml_value).collect();
            items.join(", ")
        }
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
