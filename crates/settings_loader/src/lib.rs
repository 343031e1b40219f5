//! # Settings Loader
//!
//! Centralised loading of the [`ServiceSettings`] used by the sales report service.
//! Settings come from an optional JSON file (`settings.json` by default) and can be
//! overridden through environment variables.
//!
//! ## Sources, in order of precedence
//!
//! 1. Environment variables: `HOST`, `PORT`, `SALES_DATA_PATH`
//! 2. An explicit settings file, or `settings.json` in the current directory
//! 3. Built-in defaults (`127.0.0.1:5000`, `data/sales.csv`)
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! let path = Some(PathBuf::from("config/settings.json"));
//! let settings = settings_loader::load_settings_with_fallback(path.as_ref())?;
//! let settings = settings_loader::apply_env_overrides(settings)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::ServiceSettings;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATA_PATH: &str = "SALES_DATA_PATH";

/// Loads settings from a JSON file. Missing keys take their default values.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ServiceSettings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: ServiceSettings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Tries the provided path, then `settings.json`, then the built-in defaults.
///
/// A file that exists but cannot be parsed is an error; only missing files fall through.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<ServiceSettings> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path);
        }
        tracing::warn!(
            path = %settings_path.display(),
            "settings file not found, trying default location"
        );
    }

    if settings_file_exists(DEFAULT_SETTINGS_FILE) {
        return load_settings(DEFAULT_SETTINGS_FILE);
    }

    tracing::info!("no settings file found, using defaults");
    Ok(ServiceSettings::default())
}

/// Applies `HOST`, `PORT` and `SALES_DATA_PATH` from the process environment.
pub fn apply_env_overrides(settings: ServiceSettings) -> Result<ServiceSettings> {
    apply_overrides(settings, |key| std::env::var(key).ok())
}

/// Applies overrides from any key lookup. Empty values are ignored.
pub fn apply_overrides<F>(mut settings: ServiceSettings, lookup: F) -> Result<ServiceSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get(ENV_HOST) {
        settings.host = host;
    }
    if let Some(port) = get(ENV_PORT) {
        settings.port = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid {ENV_PORT} value: {port}"))?;
    }
    if let Some(data_path) = get(ENV_DATA_PATH) {
        settings.data_path = PathBuf::from(data_path);
    }
    Ok(settings)
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}
