//! Storefront view state shared across user commands.

use askama::Template;
use shopease_core::{Product, ProductFilter, ProductId, SessionId};
use tracing::{info, instrument};

use crate::api::Backend;
use crate::cart::{BackendAck, Cart, CheckoutOutcome};
use crate::catalog::Catalog;
use crate::error::{AppError, Result};
use crate::orders::OrderHistory;
use crate::product_detail::{ProductDetail, ReviewSubmission};
use crate::views::{
    CartDrawerTemplate, CartView, OrderHistoryTemplate, ProductDetailTemplate, ProductGridTemplate,
};

/// Everything one storefront tab holds: catalog, cart, the open product
/// and the last loaded order history.
///
/// The session identifier is resolved once by the caller and injected here;
/// every cart and order request reads it from this value.
pub struct Storefront<B> {
    backend: B,
    session_id: SessionId,
    catalog: Catalog,
    cart: Cart,
    detail: Option<ProductDetail>,
    orders: OrderHistory,
}

impl<B: Backend> Storefront<B> {
    /// Create an empty storefront. Call [`start`](Self::start) to load it.
    pub fn new(backend: B, session_id: SessionId) -> Self {
        Self {
            backend,
            session_id,
            catalog: Catalog::new(),
            cart: Cart::new(),
            detail: None,
            orders: OrderHistory::default(),
        }
    }

    /// Load the unfiltered catalog, then the cart.
    ///
    /// The catalog comes first so cart lines can be resolved to products.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn start(&mut self) {
        self.catalog
            .load(&self.backend, ProductFilter::default())
            .await;
        self.cart
            .load(&self.backend, &self.session_id, &self.catalog)
            .await;
        info!(
            products = self.catalog.products().len(),
            cart_lines = self.cart.line_count(),
            "Storefront ready"
        );
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The open product detail panel, if any.
    pub const fn detail(&self) -> Option<&ProductDetail> {
        self.detail.as_ref()
    }

    pub const fn detail_mut(&mut self) -> Option<&mut ProductDetail> {
        self.detail.as_mut()
    }

    pub const fn orders(&self) -> &OrderHistory {
        &self.orders
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Re-query the catalog with `filter`.
    pub async fn apply_filter(&mut self, filter: ProductFilter) {
        self.catalog.load(&self.backend, filter).await;
    }

    /// Narrow the displayed products locally, without a request.
    pub fn search_local(&mut self, query: &str) {
        self.catalog.search_local(query);
    }

    pub async fn load_categories(&mut self) {
        self.catalog.load_categories(&self.backend).await;
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `product_id` to the cart.
    ///
    /// The product is looked up in the loaded catalog, then in the open
    /// detail panel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the product is in neither.
    pub async fn add_to_cart(&mut self, product_id: &ProductId) -> Result<BackendAck> {
        let product = self
            .known_product(product_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;
        Ok(self
            .cart
            .add(&self.backend, &self.session_id, &product)
            .await)
    }

    fn known_product(&self, product_id: &ProductId) -> Option<&Product> {
        self.catalog.find(product_id).or_else(|| {
            self.detail
                .as_ref()
                .and_then(ProductDetail::product)
                .filter(|p| &p.id == product_id)
        })
    }

    /// Re-fetch the cart from the backend.
    pub async fn reload_cart(&mut self) {
        self.cart
            .load(&self.backend, &self.session_id, &self.catalog)
            .await;
    }

    pub const fn open_cart(&mut self) {
        self.cart.open();
    }

    pub const fn close_cart(&mut self) {
        self.cart.close();
    }

    /// Place the order. `None` when checkout is not offered.
    pub async fn checkout(&mut self) -> Option<CheckoutOutcome> {
        self.cart.checkout(&self.backend, &self.session_id).await
    }

    // =========================================================================
    // Product detail
    // =========================================================================

    /// Open the detail panel for `product_id`, replacing any open one.
    pub async fn open_product(&mut self, product_id: ProductId) -> &mut ProductDetail {
        let detail = ProductDetail::open(&self.backend, product_id).await;
        self.detail.insert(detail)
    }

    pub fn close_product(&mut self) {
        self.detail = None;
    }

    /// Submit the review form of the open detail panel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if no product is open.
    pub async fn submit_review(&mut self) -> Result<ReviewSubmission> {
        let detail = self
            .detail
            .as_mut()
            .ok_or_else(|| AppError::BadRequest("no product is open".to_string()))?;
        Ok(detail.submit_review(&self.backend).await)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn load_orders(&mut self) -> &OrderHistory {
        self.orders = OrderHistory::load(&self.backend, &self.session_id).await;
        &self.orders
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the filtered product grid.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn render_products(&self) -> Result<String> {
        Ok(
            ProductGridTemplate::new(self.catalog.filtered(), self.catalog.active_filter())
                .render()?,
        )
    }

    /// Render the cart drawer.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn render_cart(&self) -> Result<String> {
        let cart = CartView::from(&self.cart);
        Ok(CartDrawerTemplate { cart: &cart }.render()?)
    }

    /// Render the open product detail panel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if no product is open, or
    /// `AppError::Render` if the template fails.
    pub fn render_detail(&self) -> Result<String> {
        let detail = self
            .detail
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("no product is open".to_string()))?;
        Ok(ProductDetailTemplate::from(detail).render()?)
    }

    /// Render the last loaded order history.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the template fails.
    pub fn render_orders(&self) -> Result<String> {
        Ok(OrderHistoryTemplate::from(&self.orders).render()?)
    }
}
