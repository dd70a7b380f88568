//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STITCHFOX_CATALOG_BASE_URL` - Base URL the catalog documents are served
//!   from (default: `http://127.0.0.1:8080/`). The gendered documents are
//!   resolved as `data/ladies_tshirts.json` and `data/mens_tshirts.json`
//!   relative to this base.
//! - `STITCHFOX_LADIES_CATALOG_URL` - Full URL override for the ladies document
//! - `STITCHFOX_MENS_CATALOG_URL` - Full URL override for the men's document

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_BASE_URL: &str = "http://127.0.0.1:8080/";
const LADIES_DOCUMENT_PATH: &str = "data/ladies_tshirts.json";
const MENS_DOCUMENT_PATH: &str = "data/mens_tshirts.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// URL of the ladies catalog document.
    pub ladies_catalog_url: Url,
    /// URL of the men's catalog document.
    pub mens_catalog_url: Url,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base = parse_url(
            "STITCHFOX_CATALOG_BASE_URL",
            &get_env_or_default("STITCHFOX_CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL),
        )?;

        let ladies_catalog_url = match get_optional_env("STITCHFOX_LADIES_CATALOG_URL") {
            Some(value) => parse_url("STITCHFOX_LADIES_CATALOG_URL", &value)?,
            None => join_url("STITCHFOX_CATALOG_BASE_URL", &base, LADIES_DOCUMENT_PATH)?,
        };
        let mens_catalog_url = match get_optional_env("STITCHFOX_MENS_CATALOG_URL") {
            Some(value) => parse_url("STITCHFOX_MENS_CATALOG_URL", &value)?,
            None => join_url("STITCHFOX_CATALOG_BASE_URL", &base, MENS_DOCUMENT_PATH)?,
        };

        Ok(Self {
            ladies_catalog_url,
            mens_catalog_url,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    value
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Join a document path onto the configured base, tolerating a base without a
/// trailing slash.
fn join_url(key: &str, base: &Url, path: &str) -> Result<Url, ConfigError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join(path)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
