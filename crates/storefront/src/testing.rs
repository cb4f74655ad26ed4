//! Recording in-memory backend for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Mutex;

use shopease_core::{
    BackendCart, BackendCartLine, Order, OrderId, OrderLine, Price, Product, ProductFilter,
    ProductId, Review, ReviewDraft, SessionId,
};

use crate::api::{AddToCartRequest, ApiError, Backend};

/// A request the fake received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListProducts(ProductFilter),
    GetProduct(ProductId),
    ListCategories,
    GetCart(SessionId),
    AddToCart(AddToCartRequest),
    Checkout(SessionId),
    ListOrders(SessionId),
    ListReviews(ProductId),
    SubmitReview(ReviewDraft),
}

/// Endpoint selector for injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListProducts,
    GetProduct,
    ListCategories,
    GetCart,
    AddToCart,
    Checkout,
    ListOrders,
    ListReviews,
    SubmitReview,
}

impl Request {
    const fn endpoint(&self) -> Endpoint {
        match self {
            Self::ListProducts(_) => Endpoint::ListProducts,
            Self::GetProduct(_) => Endpoint::GetProduct,
            Self::ListCategories => Endpoint::ListCategories,
            Self::GetCart(_) => Endpoint::GetCart,
            Self::AddToCart(_) => Endpoint::AddToCart,
            Self::Checkout(_) => Endpoint::Checkout,
            Self::ListOrders(_) => Endpoint::ListOrders,
            Self::ListReviews(_) => Endpoint::ListReviews,
            Self::SubmitReview(_) => Endpoint::SubmitReview,
        }
    }
}

#[derive(Default)]
struct FakeState {
    products: Vec<Product>,
    categories: Vec<String>,
    cart: BackendCart,
    orders: Vec<Order>,
    reviews: Vec<Review>,
    requests: Vec<Request>,
    fail_all: bool,
    failing: HashSet<Endpoint>,
}

/// Backend that serves canned data, mutates it like a real server would,
/// and records every request.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.state.lock().unwrap().products = products;
        self
    }

    pub fn with_categories(self, categories: Vec<String>) -> Self {
        self.state.lock().unwrap().categories = categories;
        self
    }

    pub fn with_cart(self, lines: &[(&str, u32)]) -> Self {
        self.state.lock().unwrap().cart = BackendCart {
            items: lines
                .iter()
                .map(|(id, quantity)| BackendCartLine {
                    product_id: ProductId::new(*id),
                    quantity: *quantity,
                })
                .collect(),
        };
        self
    }

    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.state.lock().unwrap().orders = orders;
        self
    }

    pub fn with_reviews(self, reviews: Vec<Review>) -> Self {
        self.state.lock().unwrap().reviews = reviews;
        self
    }

    /// Make every request fail with a 500.
    pub fn fail_all(&self, fail: bool) {
        self.state.lock().unwrap().fail_all = fail;
    }

    /// Make one endpoint fail with a 500.
    pub fn fail(&self, endpoint: Endpoint) {
        self.state.lock().unwrap().failing.insert(endpoint);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn server_cart(&self) -> BackendCart {
        self.state.lock().unwrap().cart.clone()
    }

    /// Record the request and decide whether it fails.
    fn record(state: &mut FakeState, request: Request) -> Result<(), ApiError> {
        let endpoint = request.endpoint();
        state.requests.push(request);
        if state.fail_all || state.failing.contains(&endpoint) {
            return Err(ApiError::Status {
                status: 500,
                body: "fake failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Backend for FakeBackend {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::ListProducts(filter.clone()))?;
        Ok(state.products.clone())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::GetProduct(id.clone()))?;
        state
            .products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: "Product not found".to_string(),
            })
    }

    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::ListCategories)?;
        Ok(state.categories.clone())
    }

    async fn get_cart(&self, session_id: &SessionId) -> Result<BackendCart, ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::GetCart(session_id.clone()))?;
        Ok(state.cart.clone())
    }

    async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::AddToCart(request.clone()))?;
        match state
            .cart
            .items
            .iter_mut()
            .find(|line| line.product_id == request.product_id)
        {
            Some(line) => line.quantity += request.quantity,
            None => state.cart.items.push(BackendCartLine {
                product_id: request.product_id.clone(),
                quantity: request.quantity,
            }),
        }
        Ok(())
    }

    async fn checkout(&self, session_id: &SessionId) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::Checkout(session_id.clone()))?;
        let lines = std::mem::take(&mut state.cart.items);
        let total = lines
            .iter()
            .filter_map(|line| {
                state
                    .products
                    .iter()
                    .find(|p| p.id == line.product_id)
                    .map(|p| p.price.times(line.quantity))
            })
            .sum::<Price>();
        let id = OrderId::new(format!("o{}", state.orders.len() + 1));
        state.orders.push(Order {
            id,
            status: "placed".to_string(),
            total,
            items: lines
                .into_iter()
                .map(|line| OrderLine {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
            created_at: None,
        });
        Ok(())
    }

    async fn list_orders(&self, session_id: &SessionId) -> Result<Vec<Order>, ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::ListOrders(session_id.clone()))?;
        Ok(state.orders.clone())
    }

    async fn list_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>, ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::ListReviews(product_id.clone()))?;
        Ok(state
            .reviews
            .iter()
            .filter(|r| &r.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn submit_review(&self, draft: &ReviewDraft) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Request::SubmitReview(draft.clone()))?;
        state.reviews.push(Review {
            product_id: draft.product_id.clone(),
            user_name: draft.user_name.clone(),
            rating: draft.rating,
            comment: Some(draft.comment.clone()),
        });
        Ok(())
    }
}

/// A catalog product with the given price in cents.
pub fn product(id: &str, title: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: String::new(),
        price: Price::from_cents(cents),
        image_url: None,
        rating: None,
        reviews_count: None,
        category: None,
    }
}

/// A session for tests.
pub fn session() -> SessionId {
    SessionId::new("test-session")
}
