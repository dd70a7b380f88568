//! Catalog loading and caching.
//!
//! The loader resolves a gender preference to one of the two static catalog
//! documents, caches fetched documents in memory keyed by document URL
//! (`moka`, never evicted for the life of the process), and selects one
//! product uniformly at random. Both random draws and the HTTP fetch sit
//! behind traits so tests can inject deterministic implementations.

mod fetch;
mod select;

pub use fetch::{CatalogFetcher, HttpFetcher};
pub use select::{Chooser, RandomChooser};

use std::sync::Arc;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use stitchfox_core::{Gender, ProductRecord};

use crate::config::ShopConfig;

/// Errors that can occur while loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("catalog fetch returned HTTP {status}")]
    Status { status: u16 },

    /// Response body was not a valid catalog document.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog document contained no products.
    #[error("catalog document is empty: {0}")]
    EmptyCatalog(String),
}

/// One of the two concrete gendered catalog documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSource {
    Ladies,
    Mens,
}

// =============================================================================
// CatalogLoader
// =============================================================================

/// Loader for the static catalog documents.
///
/// Cheaply cloneable via `Arc`; the router clones it into spawned load tasks.
#[derive(Clone)]
pub struct CatalogLoader {
    inner: Arc<CatalogLoaderInner>,
}

struct CatalogLoaderInner {
    fetcher: Arc<dyn CatalogFetcher>,
    chooser: Arc<dyn Chooser>,
    ladies_url: Url,
    mens_url: Url,
    cache: Cache<String, Arc<Vec<ProductRecord>>>,
}

impl CatalogLoader {
    /// Create a new catalog loader.
    #[must_use]
    pub fn new(
        config: &ShopConfig,
        fetcher: Arc<dyn CatalogFetcher>,
        chooser: Arc<dyn Chooser>,
    ) -> Self {
        // Two gendered documents today; capacity leaves headroom for more.
        let cache = Cache::builder().max_capacity(16).build();

        Self {
            inner: Arc::new(CatalogLoaderInner {
                fetcher,
                chooser,
                ladies_url: config.ladies_catalog_url.clone(),
                mens_url: config.mens_catalog_url.clone(),
                cache,
            }),
        }
    }

    /// Load the catalog for `gender` and select one product uniformly at
    /// random. Suspends only at the network fetch; cache hits skip the
    /// network entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails, the response is not a valid
    /// catalog document, or the document contains no products. Failed loads
    /// never populate the cache.
    #[instrument(skip(self), fields(gender = %gender))]
    pub async fn load(&self, gender: Gender) -> Result<ProductRecord, CatalogError> {
        let source = self.resolve(gender);
        let url = self.source_url(source);
        let list = self.document(url).await?;

        let index = self.inner.chooser.pick_index(list.len()) % list.len();
        list.get(index)
            .cloned()
            .ok_or_else(|| CatalogError::EmptyCatalog(url.as_str().to_string()))
    }

    /// Resolve a gender preference to a concrete document. `Any` flips a fair
    /// coin independently per call.
    fn resolve(&self, gender: Gender) -> CatalogSource {
        match gender {
            Gender::Female => CatalogSource::Ladies,
            Gender::Male => CatalogSource::Mens,
            Gender::Any => self.inner.chooser.pick_source(),
        }
    }

    fn source_url(&self, source: CatalogSource) -> &Url {
        match source {
            CatalogSource::Ladies => &self.inner.ladies_url,
            CatalogSource::Mens => &self.inner.mens_url,
        }
    }

    /// Fetch a catalog document, going to the network only on a cache miss.
    ///
    /// Concurrent misses for the same URL may fetch twice; the payload is
    /// identical across fetches of the same static document, so the last
    /// writer wins and in-flight selections keep their `Arc`.
    async fn document(&self, url: &Url) -> Result<Arc<Vec<ProductRecord>>, CatalogError> {
        let key = url.as_str().to_string();

        if let Some(list) = self.inner.cache.get(&key).await {
            debug!(url = %url, "cache hit for catalog document");
            return Ok(list);
        }

        let list = Arc::new(self.inner.fetcher.fetch(url).await?);
        if list.is_empty() {
            return Err(CatalogError::EmptyCatalog(key));
        }

        self.inner.cache.insert(key, Arc::clone(&list)).await;
        Ok(list)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    fn product(title: &str) -> ProductRecord {
        ProductRecord {
            title: title.to_string(),
            price: rust_decimal::Decimal::new(1999, 2),
            large_image: Url::parse("https://shop.example/images/tee.jpg").unwrap(),
            description: String::new(),
        }
    }

    fn test_config() -> ShopConfig {
        ShopConfig {
            ladies_catalog_url: Url::parse("http://test.local/data/ladies_tshirts.json").unwrap(),
            mens_catalog_url: Url::parse("http://test.local/data/mens_tshirts.json").unwrap(),
        }
    }

    /// Serves a fixed list per URL path and counts fetches.
    struct CountingFetcher {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl CatalogFetcher for CountingFetcher {
        async fn fetch(&self, url: &Url) -> Result<Vec<ProductRecord>, CatalogError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if url.path().contains("ladies") {
                Ok(vec![product("ladies-a"), product("ladies-b")])
            } else {
                Ok(vec![product("mens-a"), product("mens-b")])
            }
        }
    }

    /// Always fails with the given status.
    struct FailingFetcher {
        status: u16,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl CatalogFetcher for FailingFetcher {
        async fn fetch(&self, _url: &Url) -> Result<Vec<ProductRecord>, CatalogError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Err(CatalogError::Status { status: self.status })
        }
    }

    /// Deterministic chooser.
    struct FixedChooser {
        source: CatalogSource,
        index: usize,
    }

    impl Chooser for FixedChooser {
        fn pick_source(&self) -> CatalogSource {
            self.source
        }

        fn pick_index(&self, len: usize) -> usize {
            self.index % len
        }
    }

    fn loader_with(fetcher: Arc<dyn CatalogFetcher>, chooser: Arc<dyn Chooser>) -> CatalogLoader {
        CatalogLoader::new(&test_config(), fetcher, chooser)
    }

    #[tokio::test]
    async fn test_gendered_load_draws_only_from_matching_document() {
        let loader = loader_with(
            Arc::new(CountingFetcher { fetches: AtomicUsize::new(0) }),
            Arc::new(FixedChooser { source: CatalogSource::Ladies, index: 0 }),
        );

        for _ in 0..10 {
            let shirt = loader.load(Gender::Male).await.unwrap();
            assert!(shirt.title.starts_with("mens-"));
            let shirt = loader.load(Gender::Female).await.unwrap();
            assert!(shirt.title.starts_with("ladies-"));
        }
    }

    #[tokio::test]
    async fn test_any_follows_chooser_coin() {
        let loader = loader_with(
            Arc::new(CountingFetcher { fetches: AtomicUsize::new(0) }),
            Arc::new(FixedChooser { source: CatalogSource::Mens, index: 1 }),
        );

        let shirt = loader.load(Gender::Any).await.unwrap();
        assert_eq!(shirt.title, "mens-b");
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let fetcher = Arc::new(CountingFetcher { fetches: AtomicUsize::new(0) });
        let loader = loader_with(
            Arc::clone(&fetcher) as Arc<dyn CatalogFetcher>,
            Arc::new(FixedChooser { source: CatalogSource::Ladies, index: 0 }),
        );

        let first = loader.load(Gender::Female).await.unwrap();
        for _ in 0..5 {
            let again = loader.load(Gender::Female).await.unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);

        // The men's document is a separate cache entry.
        loader.load(Gender::Male).await.unwrap();
        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_load_does_not_populate_cache() {
        let fetcher = Arc::new(FailingFetcher { status: 500, fetches: AtomicUsize::new(0) });
        let loader = loader_with(
            Arc::clone(&fetcher) as Arc<dyn CatalogFetcher>,
            Arc::new(FixedChooser { source: CatalogSource::Ladies, index: 0 }),
        );

        for _ in 0..3 {
            let err = loader.load(Gender::Female).await.unwrap_err();
            assert!(matches!(err, CatalogError::Status { status: 500 }));
        }
        // Every retry went back to the network.
        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_document_is_an_error_and_not_cached() {
        struct EmptyFetcher {
            fetches: AtomicUsize,
        }

        #[async_trait]
        impl CatalogFetcher for EmptyFetcher {
            async fn fetch(&self, _url: &Url) -> Result<Vec<ProductRecord>, CatalogError> {
                self.fetches.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            }
        }

        let fetcher = Arc::new(EmptyFetcher { fetches: AtomicUsize::new(0) });
        let loader = loader_with(
            Arc::clone(&fetcher) as Arc<dyn CatalogFetcher>,
            Arc::new(FixedChooser { source: CatalogSource::Ladies, index: 0 }),
        );

        let err = loader.load(Gender::Female).await.unwrap_err();
        assert!(matches!(err, CatalogError::EmptyCatalog(_)));
        loader.load(Gender::Female).await.unwrap_err();
        assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 2);
    }
}
