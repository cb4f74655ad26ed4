//! ShopEase backend API.
//!
//! # Architecture
//!
//! - [`Backend`] is the seam between view state and the network. View-state
//!   managers are generic over it so tests can substitute a recording fake.
//! - [`BackendClient`] is the real implementation over `reqwest` + JSON.
//! - The backend is the source of truth - NO local sync, NO caching, direct
//!   API calls on every user action.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopease_storefront::api::{Backend, BackendClient};
//!
//! let client = BackendClient::new(&config);
//!
//! let shoes = client
//!     .list_products(&ProductFilter::query("shoe").sorted_by(SortKey::PriceAsc))
//!     .await?;
//! client.add_to_cart(&AddToCartRequest::single(shoes[0].id.clone(), session_id)).await?;
//! ```

mod client;
pub mod types;

use std::future::Future;

use shopease_core::{
    BackendCart, Order, Product, ProductFilter, ProductId, Review, ReviewDraft, SessionId,
};
use thiserror::Error;

pub use client::BackendClient;
pub use types::{AddToCartRequest, CheckoutRequest};

/// Maximum number of response-body characters kept on errors and in logs.
pub(crate) const BODY_SNIPPET_CHARS: usize = 200;

/// Errors that can occur when talking to the backend.
///
/// View state only distinguishes success from failure; the variants exist
/// for logging.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built from the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Operations the storefront needs from its backend.
///
/// Every method maps to exactly one HTTP request.
pub trait Backend {
    /// `GET /products` with the filter encoded as query parameters.
    fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// `GET /products/{id}`.
    fn get_product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// `GET /categories`.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    /// `GET /cart?session_id=`.
    fn get_cart(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<BackendCart, ApiError>> + Send;

    /// `POST /cart/add`. The response body is ignored.
    fn add_to_cart(
        &self,
        request: &AddToCartRequest,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /checkout`. The response body is ignored.
    fn checkout(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /orders?session_id=`.
    fn list_orders(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// `GET /reviews?product_id=`.
    fn list_reviews(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<Vec<Review>, ApiError>> + Send;

    /// `POST /reviews`. The response body is ignored.
    fn submit_review(
        &self,
        draft: &ReviewDraft,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
