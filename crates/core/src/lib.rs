//! Stitch Fox Core - Shared types library.
//!
//! This crate provides common types used across all Stitch Fox components:
//! - `storefront` - The sample t-shirt shop (catalog loader and page router)
//! - `integration-tests` - End-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Catalog product records and gender preferences
//! - [`html`] - Decoding for the HTML entities found in catalog descriptions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod html;
pub mod types;

pub use types::*;
