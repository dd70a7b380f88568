//! Fragment-keyed page state machine and its dispatch loop.
//!
//! The address fragment is the single source of truth for the visible page:
//! navigation affordances only ever set the fragment, and the router derives
//! the page from it on every change. The router owns all mutable UI-side
//! state (current page, selected product, load generation) and mutates it
//! only from [`PageRouter::handle_event`], which runs on one dispatch task.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use stitchfox_core::{Gender, ProductRecord};

use crate::catalog::{CatalogError, CatalogLoader};
use crate::events::{EventSender, ShopEvent};
use crate::payment::PaymentRequest;
use crate::ui::UiHooks;

// =============================================================================
// PageState
// =============================================================================

/// The closed set of pages. Exactly one panel is visible at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    AnyProduct,
    MaleProduct,
    FemaleProduct,
    Checkout,
    Success,
}

impl PageState {
    /// Map an address fragment to its page. Unrecognized or absent fragments
    /// default to `AnyProduct`.
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Self {
        match fragment {
            "#shop-tshirt-male" => Self::MaleProduct,
            "#shop-tshirt-female" => Self::FemaleProduct,
            "#shop-checkout" => Self::Checkout,
            "#shop-success" => Self::Success,
            _ => Self::AnyProduct,
        }
    }

    /// Gender argument for the catalog load this page triggers, if any.
    /// Checkout and Success perform no catalog load.
    #[must_use]
    pub const fn gender(self) -> Option<Gender> {
        match self {
            Self::AnyProduct => Some(Gender::Any),
            Self::MaleProduct => Some(Gender::Male),
            Self::FemaleProduct => Some(Gender::Female),
            Self::Checkout | Self::Success => None,
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AnyProduct => "any-product",
            Self::MaleProduct => "male-product",
            Self::FemaleProduct => "female-product",
            Self::Checkout => "checkout",
            Self::Success => "success",
        })
    }
}

// =============================================================================
// PageRouter
// =============================================================================

/// The page router and dispatch loop.
pub struct PageRouter {
    loader: CatalogLoader,
    ui: Arc<dyn UiHooks>,
    events: EventSender,
    fragment: String,
    state: PageState,
    selected: Option<ProductRecord>,
    /// Bumped on every transition; completions carrying an older value are
    /// stale and discarded.
    generation: u64,
    checkout_stylesheet_attached: bool,
}

impl PageRouter {
    #[must_use]
    pub fn new(loader: CatalogLoader, ui: Arc<dyn UiHooks>, events: EventSender) -> Self {
        Self {
            loader,
            ui,
            events,
            fragment: String::new(),
            state: PageState::AnyProduct,
            selected: None,
            generation: 0,
            checkout_stylesheet_attached: false,
        }
    }

    /// Currently visible page.
    #[must_use]
    pub const fn state(&self) -> PageState {
        self.state
    }

    /// Product currently on display, read by the payment collaborator.
    #[must_use]
    pub fn selected_product(&self) -> Option<&ProductRecord> {
        self.selected.as_ref()
    }

    /// Evaluate the fragment present at startup, then consume events until
    /// the channel closes or [`ShopEvent::Quit`] arrives.
    pub async fn run(
        mut self,
        initial_fragment: String,
        mut rx: mpsc::UnboundedReceiver<ShopEvent>,
    ) {
        self.handle_event(ShopEvent::FragmentChanged(initial_fragment));
        while let Some(event) = rx.recv().await {
            if matches!(event, ShopEvent::Quit) {
                info!("shutting down");
                break;
            }
            self.handle_event(event);
        }
    }

    /// Apply one event. Exposed so tests can drive the machine one event at a
    /// time.
    pub fn handle_event(&mut self, event: ShopEvent) {
        match event {
            ShopEvent::FragmentChanged(fragment) => {
                debug!(fragment = %fragment, "fragment changed");
                self.fragment = fragment;
                self.transition();
            }
            ShopEvent::Reload => self.transition(),
            ShopEvent::LoadSucceeded { generation, product } => {
                self.on_load_succeeded(generation, *product);
            }
            ShopEvent::LoadFailed { generation, error } => {
                self.on_load_failed(generation, &error);
            }
            ShopEvent::ImageReady { generation } => {
                if self.is_current(generation) {
                    self.ui.hide_loading_indicator();
                }
            }
            ShopEvent::ImageFailed { generation } => {
                if self.is_current(generation) {
                    warn!("product image failed to load");
                    self.ui.hide_loading_indicator();
                    self.ui.show_error("product image failed to load");
                }
            }
            ShopEvent::BuyClicked => self.on_buy_clicked(),
            ShopEvent::CheckoutSubmitted => {
                self.ui.show_error("This is a demo, no real checkout built");
            }
            ShopEvent::Quit => {}
        }
    }

    /// Recompute the page from the current fragment and act on it: toggle
    /// panel visibility, start a catalog load for product pages, attach the
    /// checkout stylesheet on first checkout visit.
    fn transition(&mut self) {
        // Invalidates any in-flight load or image completion.
        self.generation += 1;

        let state = PageState::from_fragment(&self.fragment);
        self.state = state;
        self.ui.set_panel_visibility(state);

        if let Some(gender) = state.gender() {
            self.begin_load(gender);
        } else {
            // A load superseded by this navigation can no longer clear the
            // indicator; clear it with the panel switch.
            self.ui.hide_loading_indicator();
            if state == PageState::Checkout {
                self.attach_checkout_stylesheet_once();
            }
        }
    }

    fn begin_load(&mut self, gender: Gender) {
        let generation = self.generation;
        self.ui.show_loading_indicator();

        let loader = self.loader.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            match loader.load(gender).await {
                Ok(product) => events.send(ShopEvent::LoadSucceeded {
                    generation,
                    product: Box::new(product),
                }),
                Err(error) => events.send(ShopEvent::LoadFailed { generation, error }),
            }
        });
    }

    fn on_load_succeeded(&mut self, generation: u64, product: ProductRecord) {
        if !self.is_current(generation) {
            return;
        }
        info!(title = %product.title, "product selected");
        // The indicator stays up until the image reports ready.
        self.ui.render_product(&product, generation);
        self.selected = Some(product);
    }

    fn on_load_failed(&mut self, generation: u64, error: &CatalogError) {
        if !self.is_current(generation) {
            return;
        }
        error!(error = %error, "catalog load failed");
        self.ui.hide_loading_indicator();
        self.ui.show_error("unable to load data");
    }

    fn on_buy_clicked(&mut self) {
        if let Some(product) = &self.selected {
            let request = PaymentRequest::for_product(product);
            info!(
                total = %request.transaction_info.total_price,
                "payment sheet approved (demo)"
            );
            // The payment collaborator reports success by setting the
            // fragment, which re-enters the router normally.
            self.events
                .send(ShopEvent::FragmentChanged("#shop-success".to_string()));
        } else {
            self.ui.show_error("no product selected");
        }
    }

    fn attach_checkout_stylesheet_once(&mut self) {
        if !self.checkout_stylesheet_attached {
            self.checkout_stylesheet_attached = true;
            self.ui.attach_checkout_stylesheet();
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation == self.generation {
            true
        } else {
            debug!(
                generation,
                current = self.generation,
                "discarding stale completion"
            );
            false
        }
    }
}
