//! Stitch Fox Storefront library.
//!
//! The storefront core is two cooperating components running on a single
//! dispatch task:
//!
//! - [`catalog::CatalogLoader`] - resolves a gender preference to one of two
//!   static catalog documents, caches fetched documents for the life of the
//!   process, and selects one product uniformly at random.
//! - [`router::PageRouter`] - a finite-state machine keyed by the address
//!   fragment. It toggles panel visibility through [`ui::UiHooks`] and starts
//!   catalog loads for product pages.
//!
//! Everything that can wake the router flows through one
//! [`events::ShopEvent`] channel: fragment changes, reloads, load and image
//! completions. Late completions carry the generation they were started under
//! and are discarded when a newer navigation has superseded them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod payment;
pub mod router;
pub mod ui;
