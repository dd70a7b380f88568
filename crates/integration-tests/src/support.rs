//! Shared test harness: scripted fetcher, deterministic chooser, recording UI.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use url::Url;

use stitchfox_core::ProductRecord;
use stitchfox_storefront::catalog::{
    CatalogError, CatalogFetcher, CatalogLoader, CatalogSource, Chooser,
};
use stitchfox_storefront::config::ShopConfig;
use stitchfox_storefront::events::{self, EventSender, ShopEvent};
use stitchfox_storefront::router::{PageRouter, PageState};
use stitchfox_storefront::ui::UiHooks;

pub const LADIES_URL: &str = "http://test.local/data/ladies_tshirts.json";
pub const MENS_URL: &str = "http://test.local/data/mens_tshirts.json";

/// Build a product record for tests. `price_cents` avoids float literals.
#[must_use]
pub fn product(title: &str, price_cents: i64) -> ProductRecord {
    ProductRecord {
        title: title.to_string(),
        price: Decimal::new(price_cents, 2),
        large_image: Url::parse("https://shop.example/images/tee.jpg").unwrap(),
        description: "T-Shirt &amp; Co&#x27;s finest".to_string(),
    }
}

/// Standard ladies fixture.
#[must_use]
pub fn ladies_list() -> Vec<ProductRecord> {
    vec![product("ladies-a", 1999), product("ladies-b", 2499)]
}

/// Standard men's fixture.
#[must_use]
pub fn mens_list() -> Vec<ProductRecord> {
    vec![product("mens-a", 1899), product("mens-b", 2899)]
}

/// Config pointing at the scripted URLs.
#[must_use]
pub fn test_config() -> ShopConfig {
    ShopConfig {
        ladies_catalog_url: Url::parse(LADIES_URL).unwrap(),
        mens_catalog_url: Url::parse(MENS_URL).unwrap(),
    }
}

// =============================================================================
// Scripted fetcher
// =============================================================================

/// What a scripted fetch returns.
#[derive(Clone)]
pub enum StubResponse {
    /// Successful fetch of the given document.
    Ok(Vec<ProductRecord>),
    /// Non-success HTTP status.
    Status(u16),
    /// A body that is not valid JSON.
    Malformed,
}

/// Scripted fetcher keyed by URL, counting fetches per URL.
pub struct StubFetcher {
    responses: Mutex<HashMap<String, StubResponse>>,
    counts: Mutex<HashMap<String, usize>>,
}

impl StubFetcher {
    /// Fetcher serving the standard fixtures for both documents.
    #[must_use]
    pub fn new() -> Self {
        let fetcher = Self {
            responses: Mutex::new(HashMap::new()),
            counts: Mutex::new(HashMap::new()),
        };
        fetcher.set_response(LADIES_URL, StubResponse::Ok(ladies_list()));
        fetcher.set_response(MENS_URL, StubResponse::Ok(mens_list()));
        fetcher
    }

    /// Replace the scripted response for `url`.
    pub fn set_response(&self, url: &str, response: StubResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// How many times `url` has been fetched.
    #[must_use]
    pub fn fetch_count(&self, url: &str) -> usize {
        self.counts.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// Total fetches across all URLs.
    #[must_use]
    pub fn total_fetches(&self) -> usize {
        self.counts.lock().unwrap().values().sum()
    }
}

impl Default for StubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogFetcher for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<ProductRecord>, CatalogError> {
        *self
            .counts
            .lock()
            .unwrap()
            .entry(url.as_str().to_string())
            .or_insert(0) += 1;

        let response = self.responses.lock().unwrap().get(url.as_str()).cloned();
        match response {
            Some(StubResponse::Ok(list)) => Ok(list),
            Some(StubResponse::Status(status)) => Err(CatalogError::Status { status }),
            Some(StubResponse::Malformed) => {
                let err = serde_json::from_str::<Vec<ProductRecord>>("<html>oops</html>")
                    .expect_err("document is not JSON");
                Err(CatalogError::Parse(err))
            }
            None => Err(CatalogError::Status { status: 404 }),
        }
    }
}

// =============================================================================
// Deterministic chooser
// =============================================================================

/// Chooser that always picks the same source and index.
#[derive(Debug, Clone, Copy)]
pub struct FixedChooser {
    pub source: CatalogSource,
    pub index: usize,
}

impl FixedChooser {
    /// Ladies coin, first product.
    #[must_use]
    pub const fn first_ladies() -> Self {
        Self {
            source: CatalogSource::Ladies,
            index: 0,
        }
    }
}

impl Chooser for FixedChooser {
    fn pick_source(&self) -> CatalogSource {
        self.source
    }

    fn pick_index(&self, len: usize) -> usize {
        self.index % len
    }
}

// =============================================================================
// Recording UI
// =============================================================================

/// One observed hook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    ShowLoading,
    HideLoading,
    Render { title: String, image_token: u64 },
    Error(String),
    Panel(PageState),
    AttachStylesheet,
}

/// Records every hook call in order. Unlike the demo's terminal UI it never
/// posts events on its own, so tests control image completions explicitly.
#[derive(Default)]
pub struct RecordingUi {
    calls: Mutex<Vec<UiCall>>,
}

impl RecordingUi {
    fn push(&self, call: UiCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// All calls observed so far.
    #[must_use]
    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Panel-visibility calls, in order.
    #[must_use]
    pub fn panels(&self) -> Vec<PageState> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Panel(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    /// Error messages shown, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Rendered product titles, in order.
    #[must_use]
    pub fn rendered(&self) -> Vec<(String, u64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                UiCall::Render { title, image_token } => Some((title, image_token)),
                _ => None,
            })
            .collect()
    }

    /// How many times the checkout stylesheet was attached.
    #[must_use]
    pub fn stylesheet_attachments(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, UiCall::AttachStylesheet))
            .count()
    }
}

impl UiHooks for RecordingUi {
    fn show_loading_indicator(&self) {
        self.push(UiCall::ShowLoading);
    }

    fn hide_loading_indicator(&self) {
        self.push(UiCall::HideLoading);
    }

    fn render_product(&self, product: &ProductRecord, image_token: u64) {
        self.push(UiCall::Render {
            title: product.title.clone(),
            image_token,
        });
    }

    fn show_error(&self, message: &str) {
        self.push(UiCall::Error(message.to_string()));
    }

    fn set_panel_visibility(&self, state: PageState) {
        self.push(UiCall::Panel(state));
    }

    fn attach_checkout_stylesheet(&self) {
        self.push(UiCall::AttachStylesheet);
    }
}

// =============================================================================
// TestShop
// =============================================================================

/// A router wired to scripted collaborators, driven one event at a time.
pub struct TestShop {
    pub router: PageRouter,
    pub ui: Arc<RecordingUi>,
    pub events: EventSender,
    rx: mpsc::UnboundedReceiver<ShopEvent>,
}

impl TestShop {
    #[must_use]
    pub fn new(fetcher: Arc<dyn CatalogFetcher>, chooser: Arc<dyn Chooser>) -> Self {
        let loader = CatalogLoader::new(&test_config(), fetcher, chooser);
        let (events, rx) = events::channel();
        let ui = Arc::new(RecordingUi::default());
        let router = PageRouter::new(loader, Arc::clone(&ui) as Arc<dyn UiHooks>, events.clone());

        Self {
            router,
            ui,
            events,
            rx,
        }
    }

    /// Set the address fragment, as a navigation affordance would.
    pub fn navigate(&mut self, fragment: &str) {
        self.router
            .handle_event(ShopEvent::FragmentChanged(fragment.to_string()));
    }

    /// Feed the next queued event (e.g. a load completion) to the router.
    ///
    /// # Panics
    ///
    /// Panics if no event arrives within one second.
    pub async fn pump(&mut self) {
        let event = tokio::time::timeout(Duration::from_secs(1), self.rx.recv())
            .await
            .expect("timed out waiting for an event")
            .expect("event channel closed");
        self.router.handle_event(event);
    }

    /// Feed queued events to the router until the channel stays idle.
    pub async fn settle(&mut self) {
        while let Ok(Some(event)) =
            tokio::time::timeout(Duration::from_millis(50), self.rx.recv()).await
        {
            self.router.handle_event(event);
        }
    }
}
