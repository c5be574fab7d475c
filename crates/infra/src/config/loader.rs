//! Configuration loader
//!
//! Loads [`ClientConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If `MINUTES_API_BASE_URL` is unset, falls back to a config file
//! 4. If no file is found either, uses [`ClientConfig::default`]
//!
//! ## Environment Variables
//! - `MINUTES_API_BASE_URL`: API base URL (required for env loading)
//! - `MINUTES_HTTP_TIMEOUT_SECS`: transport timeout in seconds
//! - `MINUTES_USER_AGENT`: user agent sent with every request
//! - `MINUTES_LOG_LEVEL`: default tracing filter
//!
//! ## File Locations
//! The loader probes `minutes.{toml,json}` and `config.{toml,json}` in the
//! current directory, its parent, and next to the executable.

use std::path::{Path, PathBuf};

use minutes_domain::{ClientConfig, MinutesError, Result};
use url::Url;

use crate::errors::InfraError;

pub const ENV_BASE_URL: &str = "MINUTES_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MINUTES_HTTP_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "MINUTES_USER_AGENT";
pub const ENV_LOG_LEVEL: &str = "MINUTES_LOG_LEVEL";

const CONFIG_FILE_NAMES: [&str; 4] = ["minutes.toml", "minutes.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `MinutesError::Config` when a source exists but is invalid. A
/// missing source is not an error.
pub fn load() -> Result<ClientConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Could not load .env file"),
    }

    if std::env::var_os(ENV_BASE_URL).is_some() {
        let config = load_from_env()?;
        tracing::info!(base_url = %config.base_url, "Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No configuration source found, using defaults");
            Ok(ClientConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `MINUTES_API_BASE_URL` is required; the other variables fall back to
/// their defaults.
///
/// # Errors
/// Returns `MinutesError::Config` if the base URL is missing or any value is
/// invalid.
pub fn load_from_env() -> Result<ClientConfig> {
    let defaults = ClientConfig::default();

    let base_url = env_var(ENV_BASE_URL)?;
    let timeout_secs = match std::env::var(ENV_TIMEOUT_SECS) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| MinutesError::Config(format!("Invalid HTTP timeout: {e}")))?,
        Err(_) => defaults.timeout_secs,
    };
    let user_agent = std::env::var(ENV_USER_AGENT).ok().filter(|s| !s.trim().is_empty());
    let log_level = std::env::var(ENV_LOG_LEVEL).unwrap_or(defaults.log_level);

    validate(ClientConfig { base_url, timeout_secs, user_agent, log_level })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is chosen by
/// extension (`.toml` or `.json`); missing fields take their defaults.
///
/// # Errors
/// Returns `MinutesError::Config` if the file is missing, unreadable,
/// malformed or holds invalid values.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MinutesError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MinutesError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MinutesError::Config(format!("Failed to read config file: {e}")))?;

    validate(parse_config(&contents, &config_path)?)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MinutesError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MinutesError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(MinutesError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Reject configurations the HTTP stack cannot use.
fn validate(config: ClientConfig) -> Result<ClientConfig> {
    let url = Url::parse(&config.base_url).map_err(|e| MinutesError::from(InfraError::from(e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(MinutesError::Config(format!(
            "API base URL must be http(s): {}",
            config.base_url
        )));
    }
    if config.timeout_secs == 0 {
        return Err(MinutesError::Config("HTTP timeout must be at least one second".into()));
    }
    Ok(config)
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join(".."));
        dirs.insert(0, cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        MinutesError::Config(format!("Missing required environment variable: {key}"))
    })
}
