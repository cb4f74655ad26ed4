//! ShopEase storefront library.
//!
//! Backend API client, session identity, and the catalog, cart, product
//! detail and order history view state, plus their text views. Front-ends
//! drive everything through [`state::Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod product_detail;
pub mod session;
pub mod state;
pub mod storage;
pub mod views;

#[cfg(test)]
mod testing;

pub use error::{AppError, Result};
pub use state::Storefront;
