//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `SHOPEASE_BACKEND_URL` - Backend API base URL (default: `http://localhost:8000`)
//! - `SHOPEASE_STORAGE_PATH` - Local storage file holding the session token
//!   (default: `.shopease/local_storage.json`)
//! - `SHOPEASE_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Backend used when `SHOPEASE_BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Local storage file used when `SHOPEASE_STORAGE_PATH` is not set.
pub const DEFAULT_STORAGE_PATH: &str = ".shopease/local_storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend API base URL
    pub backend_url: Url,
    /// File backing local storage
    pub storage_path: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_url = parse_backend_url(
            &lookup("SHOPEASE_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        )?;
        let storage_path = lookup("SHOPEASE_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let log_format = lookup("SHOPEASE_LOG_FORMAT")
            .map(|v| {
                v.parse::<LogFormat>().map_err(|e| {
                    ConfigError::InvalidEnvVar("SHOPEASE_LOG_FORMAT".to_string(), e)
                })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            backend_url,
            storage_path,
            log_format,
        })
    }

    /// Configuration pointing at `backend_url` with all other values defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `backend_url` is not an absolute HTTP(S) URL.
    pub fn for_backend(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            log_format: LogFormat::default(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and validate the backend base URL.
///
/// A trailing slash is ensured so that relative joins keep any path prefix.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("SHOPEASE_BACKEND_URL".to_string(), msg);

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https (got {})",
            url.scheme()
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backend_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("SHOPEASE_BACKEND_URL", "https://api.shop.test/v1"),
            ("SHOPEASE_STORAGE_PATH", "/tmp/profile.json"),
            ("SHOPEASE_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url.as_str(), "https://api.shop.test/v1/");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/profile.json"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_backend_url() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("SHOPEASE_BACKEND_URL", "not a url")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "SHOPEASE_BACKEND_URL"));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert!(StorefrontConfig::for_backend("ftp://files.example").is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let result =
            StorefrontConfig::from_lookup(lookup_from(&[("SHOPEASE_LOG_FORMAT", "xml")]));
        assert!(result.is_err());
    }
}
