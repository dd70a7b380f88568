//! Hooks the router and loader use to drive the presentation layer.

use stitchfox_core::{ProductRecord, html};

use crate::events::{EventSender, ShopEvent};
use crate::router::PageState;

/// Rendering collaborator interface.
///
/// `render_product` hands over an `image_token`: the generation the UI layer
/// must echo back in [`ShopEvent::ImageReady`] or [`ShopEvent::ImageFailed`]
/// once the product image finishes (or fails) loading, so the router can
/// discard image completions from a superseded navigation.
pub trait UiHooks: Send + Sync {
    /// Show the loading indicator.
    fn show_loading_indicator(&self);

    /// Hide the loading indicator.
    fn hide_loading_indicator(&self);

    /// Display a product. The image asset keeps loading in the background;
    /// see the trait docs for `image_token`.
    fn render_product(&self, product: &ProductRecord, image_token: u64);

    /// Display an error message within the currently selected panel.
    fn show_error(&self, message: &str);

    /// Show exactly the panel for `state` and hide all others.
    fn set_panel_visibility(&self, state: PageState);

    /// Attach the checkout stylesheet. The router guarantees at most one call
    /// per process lifetime.
    fn attach_checkout_stylesheet(&self);
}

/// Terminal renderer for the demo binary.
///
/// Decodes HTML entities for display and reports the image as ready
/// immediately - there is no real image pipeline in a terminal.
pub struct TerminalUi {
    events: EventSender,
}

impl TerminalUi {
    #[must_use]
    pub const fn new(events: EventSender) -> Self {
        Self { events }
    }
}

#[allow(clippy::print_stdout)]
impl UiHooks for TerminalUi {
    fn show_loading_indicator(&self) {
        println!("  [loading...]");
    }

    fn hide_loading_indicator(&self) {
        println!("  [loaded]");
    }

    fn render_product(&self, product: &ProductRecord, image_token: u64) {
        println!("  {}  {}", product.title, product.display_price());
        println!("  {}", html::decode_entities(&product.description));
        println!("  image: {}", product.large_image);
        self.events.send(ShopEvent::ImageReady {
            generation: image_token,
        });
    }

    fn show_error(&self, message: &str) {
        println!("  !! {message}");
    }

    fn set_panel_visibility(&self, state: PageState) {
        println!("== {state} ==");
    }

    fn attach_checkout_stylesheet(&self) {
        println!("  [checkout stylesheet attached]");
    }
}
