//! Integration tests for the ShopEase storefront.
//!
//! [`FakeStore`] serves the backend HTTP API from memory on an ephemeral
//! port, so the tests under `tests/` drive the real `reqwest` client end to
//! end. It records every request it receives and can be told to fail.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopease-integration-tests
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use shopease_core::{
    BackendCartLine, Order, OrderId, OrderLine, Price, Product, ProductId, Review, ReviewDraft,
};
use shopease_storefront::api::{AddToCartRequest, BackendClient, CheckoutRequest};
use url::Url;

/// A request as the fake backend saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Default)]
struct StoreState {
    products: Vec<Product>,
    raw_products: Option<Vec<Value>>,
    carts: HashMap<String, Vec<BackendCartLine>>,
    orders: HashMap<String, Vec<Order>>,
    reviews: Vec<Review>,
    requests: Vec<RecordedRequest>,
    failing: HashSet<String>,
    fail_all: bool,
}

/// In-memory ShopEase backend listening on `127.0.0.1`.
///
/// Products are served with Mongo-style `_id` keys, like the real backend.
#[derive(Clone)]
pub struct FakeStore {
    state: Arc<Mutex<StoreState>>,
    base_url: Url,
}

impl FakeStore {
    /// Start a fake backend at the root of an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn spawn() -> io::Result<Self> {
        Self::spawn_with_prefix("").await
    }

    /// Start a fake backend whose routes live under `prefix` (e.g. `/api`).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn spawn_with_prefix(prefix: &str) -> io::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = Url::parse(&format!("http://{addr}{prefix}/"))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let store = Self {
            state: Arc::default(),
            base_url,
        };

        let mut app = routes().with_state(store.clone());
        if !prefix.is_empty() {
            app = Router::new().nest(prefix, app);
        }
        let app = app.layer(middleware::from_fn_with_state(store.clone(), record_and_fail));

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Fake backend stopped: {e}");
            }
        });

        Ok(store)
    }

    /// Base URL to point a client at, with a trailing slash.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A real HTTP client for this backend.
    #[must_use]
    pub fn client(&self) -> BackendClient {
        BackendClient::with_base_url(self.base_url.clone())
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    pub fn seed_products(&self, products: Vec<Product>) {
        self.lock().products = products;
    }

    /// Serve `products` verbatim from `GET /products`, bypassing filtering.
    ///
    /// For payloads the typed seeding cannot express, such as `null` fields
    /// or numeric ids.
    pub fn seed_raw_products(&self, products: Vec<Value>) {
        self.lock().raw_products = Some(products);
    }

    pub fn seed_reviews(&self, reviews: Vec<Review>) {
        self.lock().reviews = reviews;
    }

    pub fn seed_cart(&self, session_id: &str, lines: &[(&str, u32)]) {
        self.lock().carts.insert(
            session_id.to_string(),
            lines
                .iter()
                .map(|(id, quantity)| BackendCartLine {
                    product_id: ProductId::new(*id),
                    quantity: *quantity,
                })
                .collect(),
        );
    }

    // =========================================================================
    // Failure injection
    // =========================================================================

    /// Answer every request with a 500.
    pub fn fail_all(&self, fail: bool) {
        self.lock().fail_all = fail;
    }

    /// Answer requests to `path` (e.g. `/checkout`) with a 500.
    pub fn fail_path(&self, path: &str) {
        self.lock().failing.insert(path.to_string());
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Recorded requests whose path ends with `path`.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.path.ends_with(path))
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Server-side cart for `session_id`.
    #[must_use]
    pub fn cart(&self, session_id: &str) -> Vec<BackendCartLine> {
        self.lock().carts.get(session_id).cloned().unwrap_or_default()
    }

    /// Server-side orders for `session_id`.
    #[must_use]
    pub fn orders(&self, session_id: &str) -> Vec<Order> {
        self.lock().orders.get(session_id).cloned().unwrap_or_default()
    }
}

/// A catalog product with the given price in cents.
#[must_use]
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

// =============================================================================
// Routes
// =============================================================================

fn routes() -> Router<FakeStore> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/categories", get(list_categories))
        .route("/cart", get(get_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/checkout", post(checkout))
        .route("/orders", get(list_orders))
        .route("/reviews", get(list_reviews).post(submit_review))
}

async fn record_and_fail(State(store): State<FakeStore>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let failing = {
        let mut state = store.lock();
        state.requests.push(RecordedRequest {
            method: request.method().clone(),
            path: path.clone(),
            query: request.uri().query().map(str::to_string),
        });
        state.fail_all || state.failing.iter().any(|p| path.ends_with(p.as_str()))
    };

    if failing {
        return (StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response();
    }
    next.run(request).await
}

#[derive(Deserialize)]
struct ProductQuery {
    q: Option<String>,
    category: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    sort: Option<String>,
}

#[derive(Deserialize)]
struct SessionQuery {
    session_id: String,
}

#[derive(Deserialize)]
struct ReviewQuery {
    product_id: String,
}

fn to_wire(product: &Product) -> Value {
    let mut value = serde_json::to_value(product).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        if let Some(id) = map.remove("id") {
            map.insert("_id".to_string(), id);
        }
    }
    value
}

async fn list_products(
    State(store): State<FakeStore>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Value>> {
    let state = store.lock();
    if let Some(raw) = &state.raw_products {
        return Json(raw.clone());
    }
    let needle = query.q.as_deref().map(str::to_lowercase);

    let mut products: Vec<&Product> = state
        .products
        .iter()
        .filter(|p| needle.as_deref().is_none_or(|n| p.matches_text(n)))
        .filter(|p| {
            query
                .category
                .as_deref()
                .is_none_or(|c| p.category.as_deref() == Some(c))
        })
        .filter(|p| query.min_price.is_none_or(|min| p.price.amount() >= min))
        .filter(|p| query.max_price.is_none_or(|max| p.price.amount() <= max))
        .collect();

    match query.sort.as_deref() {
        Some("price_asc") => products.sort_by_key(|p| p.price),
        Some("price_desc") => products.sort_by_key(|p| std::cmp::Reverse(p.price)),
        Some("rating_desc") => {
            products.sort_by(|a, b| b.display_rating().total_cmp(&a.display_rating()));
        }
        _ => {}
    }

    Json(products.into_iter().map(to_wire).collect())
}

async fn get_product(State(store): State<FakeStore>, Path(id): Path<String>) -> Response {
    let state = store.lock();
    match state.products.iter().find(|p| p.id.as_str() == id) {
        Some(product) => Json(to_wire(product)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Product not found"})),
        )
            .into_response(),
    }
}

async fn list_categories(State(store): State<FakeStore>) -> Json<Vec<String>> {
    let state = store.lock();
    let categories: BTreeSet<String> = state
        .products
        .iter()
        .filter_map(|p| p.category.clone())
        .collect();
    Json(categories.into_iter().collect())
}

async fn get_cart(
    State(store): State<FakeStore>,
    Query(query): Query<SessionQuery>,
) -> Json<Value> {
    let items = store.cart(&query.session_id);
    Json(json!({ "items": items }))
}

async fn add_to_cart(
    State(store): State<FakeStore>,
    Json(body): Json<AddToCartRequest>,
) -> Json<Value> {
    let mut state = store.lock();
    let lines = state
        .carts
        .entry(body.session_id.into_inner())
        .or_default();
    match lines.iter_mut().find(|l| l.product_id == body.product_id) {
        Some(line) => line.quantity += body.quantity,
        None => lines.push(BackendCartLine {
            product_id: body.product_id,
            quantity: body.quantity,
        }),
    }
    Json(json!({"message": "Added to cart"}))
}

async fn checkout(
    State(store): State<FakeStore>,
    Json(body): Json<CheckoutRequest>,
) -> Response {
    let mut state = store.lock();
    let session_id = body.session_id.into_inner();
    let lines = state.carts.remove(&session_id).unwrap_or_default();
    if lines.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Cart is empty"})),
        )
            .into_response();
    }

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
    let orders = state.orders.entry(session_id).or_default();
    let id = OrderId::new(format!("order-{}", orders.len() + 1));
    orders.push(Order {
        id: id.clone(),
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

    Json(json!({"order_id": id})).into_response()
}

async fn list_orders(
    State(store): State<FakeStore>,
    Query(query): Query<SessionQuery>,
) -> Json<Vec<Order>> {
    Json(store.orders(&query.session_id))
}

async fn list_reviews(
    State(store): State<FakeStore>,
    Query(query): Query<ReviewQuery>,
) -> Json<Vec<Review>> {
    let state = store.lock();
    Json(
        state
            .reviews
            .iter()
            .filter(|r| r.product_id.as_str() == query.product_id)
            .cloned()
            .collect(),
    )
}

async fn submit_review(
    State(store): State<FakeStore>,
    Json(draft): Json<ReviewDraft>,
) -> (StatusCode, Json<Value>) {
    store.lock().reviews.push(Review {
        product_id: draft.product_id,
        user_name: draft.user_name,
        rating: draft.rating,
        comment: Some(draft.comment),
    });
    (StatusCode::CREATED, Json(json!({"message": "Review added"})))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_product_uses_underscore_id_and_numeric_price() {
        let value = to_wire(&product("p1", "Tote", 999));
        assert_eq!(value["_id"], "p1");
        assert!(value.get("id").is_none());
        assert!(value["price"].is_number());
    }
}
