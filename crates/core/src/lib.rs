//! ShopEase Core - Shared types library.
//!
//! This crate provides the domain types used across all ShopEase components:
//! - `storefront` - Backend API client and view state
//! - `cli` - The `shopease` command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, ratings, and the catalog/cart/order/review models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
