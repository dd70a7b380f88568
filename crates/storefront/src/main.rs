//! Stitch Fox Storefront - sample t-shirt shop demo.
//!
//! Drives the page router from stdin: each line is either an address fragment
//! (`#shop-tshirt-male`, `#shop-checkout`, ...) or one of the commands
//! `reload`, `buy`, `submit`, `quit`. Unrecognized fragments land on the
//! any-product page, exactly like a browser address bar.
//!
//! # Architecture
//!
//! - Catalog documents are fetched over HTTP from the configured base URL
//!   (see `config`) and cached in memory for the life of the process
//! - A single dispatch task owns all page state; stdin and load tasks only
//!   post events to it

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stitchfox_storefront::catalog::{CatalogLoader, HttpFetcher, RandomChooser};
use stitchfox_storefront::config::ShopConfig;
use stitchfox_storefront::error::Result;
use stitchfox_storefront::events::{self, EventSender, ShopEvent};
use stitchfox_storefront::router::PageRouter;
use stitchfox_storefront::ui::TerminalUi;

#[derive(Debug, Parser)]
#[command(name = "stitchfox-storefront", about = "Sample t-shirt storefront demo")]
struct Args {
    /// Address fragment to start on, e.g. "#shop-tshirt-male".
    #[arg(long, default_value = "")]
    fragment: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stitchfox_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ShopConfig::from_env()?;
    tracing::info!(
        ladies = %config.ladies_catalog_url,
        mens = %config.mens_catalog_url,
        "catalog documents configured"
    );

    let loader = CatalogLoader::new(
        &config,
        Arc::new(HttpFetcher::new()),
        Arc::new(RandomChooser),
    );

    let (events, rx) = events::channel();
    let ui = Arc::new(TerminalUi::new(events.clone()));
    let router = PageRouter::new(loader, ui, events.clone());

    tokio::spawn(read_commands(events));

    tokio::select! {
        () = router.run(args.fragment, rx) => {}
        () = shutdown_signal() => {}
    }

    Ok(())
}

/// Translate stdin lines into router events.
async fn read_commands(events: EventSender) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match line.trim() {
                "" => {}
                "quit" => {
                    events.send(ShopEvent::Quit);
                    return;
                }
                "reload" => events.send(ShopEvent::Reload),
                "buy" => events.send(ShopEvent::BuyClicked),
                "submit" => events.send(ShopEvent::CheckoutSubmitted),
                fragment => events.send(ShopEvent::FragmentChanged(fragment.to_string())),
            },
            Ok(None) => {
                events.send(ShopEvent::Quit);
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                events.send(ShopEvent::Quit);
                return;
            }
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
