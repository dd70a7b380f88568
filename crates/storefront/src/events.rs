//! Event channel between the router, load tasks, and the UI layer.
//!
//! All state mutation happens on the single dispatch task that consumes this
//! channel, so ordering between navigations and late completions is exactly
//! arrival order. Load and image completions carry the generation they were
//! started under; the router discards completions from a superseded
//! navigation.

use tokio::sync::mpsc;

use stitchfox_core::ProductRecord;

use crate::catalog::CatalogError;

/// Everything that can wake the dispatch loop.
#[derive(Debug)]
pub enum ShopEvent {
    /// The address fragment changed. Navigation affordances only ever set the
    /// fragment; they never call the transition function directly.
    FragmentChanged(String),

    /// Re-run the transition for the current fragment without changing it,
    /// e.g. to retry a failed catalog load.
    Reload,

    /// A catalog load finished with a selected product.
    LoadSucceeded {
        generation: u64,
        product: Box<ProductRecord>,
    },

    /// A catalog load failed.
    LoadFailed {
        generation: u64,
        error: CatalogError,
    },

    /// The image asset for the rendered product finished loading.
    ImageReady { generation: u64 },

    /// The image asset failed to load.
    ImageFailed { generation: u64 },

    /// The buy button was clicked on the currently selected product.
    BuyClicked,

    /// The legacy checkout form was submitted.
    CheckoutSubmitted,

    /// Stop the dispatch loop (demo shutdown).
    Quit,
}

/// Cloneable handle for posting events to the dispatch loop.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ShopEvent>,
}

impl EventSender {
    /// Post an event. A closed channel means the dispatch loop is shutting
    /// down; the event is dropped.
    pub fn send(&self, event: ShopEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("dispatch loop closed, dropping event");
        }
    }
}

/// Create the event channel.
#[must_use]
pub fn channel() -> (EventSender, mpsc::UnboundedReceiver<ShopEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_arrive_in_send_order() {
        let (tx, mut rx) = channel();
        tx.send(ShopEvent::FragmentChanged("#shop-checkout".to_string()));
        tx.send(ShopEvent::Reload);

        assert!(matches!(
            rx.recv().await.unwrap(),
            ShopEvent::FragmentChanged(f) if f == "#shop-checkout"
        ));
        assert!(matches!(rx.recv().await.unwrap(), ShopEvent::Reload));
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped_is_silent() {
        let (tx, rx) = channel();
        drop(rx);
        // Must not panic.
        tx.send(ShopEvent::Reload);
    }
}
