//! Unified error handling for the storefront.
//!
//! Provides an application-level `AppError` wrapping the per-concern error
//! types. No error is fatal to the process; catalog failures are local to a
//! single navigation attempt and leave prior state intact.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog load failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
