//! HTTP implementation of [`Backend`] using `reqwest` and JSON bodies.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shopease_core::{
    BackendCart, Order, Product, ProductFilter, ProductId, Review, ReviewDraft, SessionId,
};
use tracing::{debug, instrument};
use url::Url;

use super::types::{AddToCartRequest, CheckoutRequest};
use super::{ApiError, BODY_SNIPPET_CHARS, Backend};
use crate::config::StorefrontConfig;

// =============================================================================
// BackendClient
// =============================================================================

/// Client for the ShopEase backend API.
///
/// Cheap to clone; clones share one connection pool. No timeout is applied
/// beyond the transport default and nothing is cached.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_base_url(config.backend_url.clone())
    }

    /// Create a client for an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build an endpoint URL from path segments and query pairs.
    ///
    /// Segments are percent-encoded, so identifiers containing `/` or `?`
    /// stay inside their segment.
    fn endpoint<K, V>(&self, segments: &[&str], query: &[(K, V)]) -> Result<Url, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{} cannot be a base", self.inner.base_url)))?
            .pop_if_empty()
            .extend(segments);

        // Only touch the query when there is something to add; an empty
        // serializer would still leave a bare `?` behind.
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Issue a GET and decode the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.inner.client.get(url).send().await?;
        let body = Self::read_success_body(response).await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&body),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Issue a POST with a JSON body, discarding the response body.
    async fn post_json<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), ApiError> {
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::read_success_body(response).await.map(drop)
    }

    /// Read the body, turning non-success statuses into [`ApiError::Status`].
    async fn read_success_body(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %snippet(&body),
                "Backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        Ok(body)
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}

const NO_QUERY: &[(&str, &str)] = &[];

impl Backend for BackendClient {
    // =========================================================================
    // Catalog
    // =========================================================================

    #[instrument(skip(self))]
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(&["products"], &filter.query_pairs())?;
        let products: Vec<Product> = self.get_json(url).await?;
        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products", id.as_str()], NO_QUERY)?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["categories"], NO_QUERY)?;
        self.get_json(url).await
    }

    // =========================================================================
    // Cart & Checkout
    // =========================================================================

    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn get_cart(&self, session_id: &SessionId) -> Result<BackendCart, ApiError> {
        let url = self.endpoint(&["cart"], &[("session_id", session_id.as_str())])?;
        let cart: BackendCart = self.get_json(url).await?;
        debug!(lines = cart.items.len(), "Loaded cart");
        Ok(cart)
    }

    #[instrument(skip(self), fields(product_id = %request.product_id))]
    async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["cart", "add"], NO_QUERY)?;
        self.post_json(url, request).await
    }

    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn checkout(&self, session_id: &SessionId) -> Result<(), ApiError> {
        let url = self.endpoint(&["checkout"], NO_QUERY)?;
        let body = CheckoutRequest {
            session_id: session_id.clone(),
        };
        self.post_json(url, &body).await
    }

    // =========================================================================
    // Orders & Reviews
    // =========================================================================

    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn list_orders(&self, session_id: &SessionId) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["orders"], &[("session_id", session_id.as_str())])?;
        self.get_json(url).await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn list_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>, ApiError> {
        let url = self.endpoint(&["reviews"], &[("product_id", product_id.as_str())])?;
        self.get_json(url).await
    }

    #[instrument(skip(self, draft), fields(product_id = %draft.product_id))]
    async fn submit_review(&self, draft: &ReviewDraft) -> Result<(), ApiError> {
        let url = self.endpoint(&["reviews"], NO_QUERY)?;
        self.post_json(url, draft).await
    }
}
