//! Plain-text views rendered with askama.
//!
//! View structs carry pre-formatted strings so templates stay free of
//! formatting logic.

pub mod cart;
pub mod orders;
pub mod products;

pub use cart::{CartBadgeTemplate, CartDrawerTemplate, CartItemView, CartView};
pub use orders::{OrderHistoryTemplate, OrderView};
pub use products::{
    ProductDetailTemplate, ProductGridTemplate, ProductView, ReviewView, filter_summary,
};
