//! Core types for ShopEase.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the wire models exchanged with the storefront backend.

pub mod cart;
mod de;
pub mod filter;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod rating;
pub mod review;

pub use cart::{BackendCart, BackendCartLine};
pub use filter::{ProductFilter, SortKey, SortKeyError};
pub use id::*;
pub use order::{Order, OrderLine};
pub use price::Price;
pub use product::Product;
pub use rating::{Rating, RatingError};
pub use review::{Review, ReviewDraft};
