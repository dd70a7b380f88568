//! Fetching catalog documents over HTTP.

use async_trait::async_trait;
use url::Url;

use stitchfox_core::ProductRecord;

use super::CatalogError;

/// Fetches a catalog document.
///
/// The production implementation is [`HttpFetcher`]; tests inject scripted
/// implementations instead of standing up a server.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetch and parse the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// malformed body.
    async fn fetch(&self, url: &Url) -> Result<Vec<ProductRecord>, CatalogError>;
}

/// `reqwest`-backed fetcher for the static catalog documents.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new fetcher with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<ProductRecord>, CatalogError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "catalog fetch returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(list) => Ok(list),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(200).collect::<String>(),
                    "failed to parse catalog document"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }
}
