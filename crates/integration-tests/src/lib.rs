//! Integration tests for Stitch Fox.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stitchfox-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `router_flow` - Page routing scenarios across all five pages
//! - `catalog_loading` - Catalog fetch, cache, and selection properties
//!
//! The [`support`] module provides the shared harness: a scripted fetcher, a
//! deterministic chooser, a UI implementation that records every hook call,
//! and a [`support::TestShop`] that wires a router to all three and drives it
//! one event at a time.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

pub mod support;
