//! Cart view state: lines, drawer visibility, and sync with the backend.
//!
//! Adds are optimistic and never rolled back. When the backend rejects a
//! mutating request the cart records the divergence in [`CartSync`] instead
//! of hiding it; the next successful [`Cart::load`] reconciles it away.

use shopease_core::{Price, Product, ProductId, SessionId};
use tracing::{debug, instrument, warn};

use crate::api::{AddToCartRequest, Backend};
use crate::catalog::Catalog;

/// Confirmation shown after every checkout.
pub const ORDER_CONFIRMATION: &str = "Order placed successfully!";

/// A cart line with its resolved product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Whether the local cart is known to match the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartSync {
    /// Every mutation since the last load was accepted.
    #[default]
    InSync,
    /// Some mutations were applied locally but rejected by the backend.
    Diverged {
        /// Failed add/checkout requests since the last successful load.
        failed_requests: u32,
    },
}

impl CartSync {
    const fn record_failure(self) -> Self {
        match self {
            Self::InSync => Self::Diverged { failed_requests: 1 },
            Self::Diverged { failed_requests } => Self::Diverged {
                failed_requests: failed_requests + 1,
            },
        }
    }
}

/// How the backend answered a mutating request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendAck {
    Accepted,
    Rejected,
}

impl BackendAck {
    const fn from_ok(ok: bool) -> Self {
        if ok { Self::Accepted } else { Self::Rejected }
    }
}

/// Result of a checkout.
///
/// The UI shows [`confirmation`](Self::confirmation) no matter what the
/// backend said; `backend` keeps the real answer observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub backend: BackendAck,
    pub confirmation: &'static str,
}

/// The shopping cart drawer.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    open: bool,
    placing_order: bool,
    sync: CartSync,
}

impl Cart {
    /// An empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (the badge on the cart button).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn open(&mut self) {
        self.open = true;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub const fn is_placing_order(&self) -> bool {
        self.placing_order
    }

    #[must_use]
    pub const fn sync(&self) -> CartSync {
        self.sync
    }

    /// Checkout is offered only for a non-empty cart with no order in flight.
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        !self.placing_order && !self.lines.is_empty()
    }

    /// Fetch the backend cart and replace local lines with it.
    ///
    /// Each line is resolved against the loaded catalog; lines whose product
    /// is not loaded, or whose quantity is zero, are dropped. On failure the
    /// local cart is left as is.
    #[instrument(skip(self, backend, catalog), fields(session_id = %session_id))]
    pub async fn load(&mut self, backend: &impl Backend, session_id: &SessionId, catalog: &Catalog) {
        let remote = match backend.get_cart(session_id).await {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "Failed to load cart; keeping local state");
                return;
            }
        };

        let total = remote.items.len();
        self.lines = remote
            .items
            .into_iter()
            .filter(|line| line.quantity > 0)
            .filter_map(|line| {
                catalog.find(&line.product_id).map(|product| CartLine {
                    product: product.clone(),
                    quantity: line.quantity,
                })
            })
            .collect();
        self.sync = CartSync::InSync;

        let dropped = total - self.lines.len();
        if dropped > 0 {
            debug!(dropped, "Dropped empty cart lines or lines for products not in the catalog");
        }
    }

    /// Add one unit of `product`.
    ///
    /// The request is sent first; whatever the answer, the drawer opens and
    /// the local line is incremented or appended. A rejection is recorded in
    /// [`CartSync`] and returned, but nothing is rolled back.
    #[instrument(skip(self, backend, product), fields(product_id = %product.id))]
    pub async fn add(
        &mut self,
        backend: &impl Backend,
        session_id: &SessionId,
        product: &Product,
    ) -> BackendAck {
        let request = AddToCartRequest::single(product.id.clone(), session_id.clone());
        let ack = match backend.add_to_cart(&request).await {
            Ok(()) => BackendAck::Accepted,
            Err(e) => {
                warn!(error = %e, "Backend rejected add to cart; keeping optimistic line");
                BackendAck::Rejected
            }
        };

        self.open = true;
        self.apply_add(product);
        if ack == BackendAck::Rejected {
            self.sync = self.sync.record_failure();
        }
        ack
    }

    /// Increment the line for `product`, or append a new line of one.
    fn apply_add(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.product.id == id)
    }

    /// Place the order.
    ///
    /// Returns `None` without any request when checkout is not offered.
    /// Otherwise the cart is cleared, the drawer closed and the confirmation
    /// returned regardless of the backend's answer. A rejected checkout is
    /// logged and recorded in [`CartSync`]; the UI does not distinguish it.
    #[instrument(skip(self, backend), fields(session_id = %session_id))]
    pub async fn checkout(
        &mut self,
        backend: &impl Backend,
        session_id: &SessionId,
    ) -> Option<CheckoutOutcome> {
        if !self.can_checkout() {
            debug!("Checkout not available");
            return None;
        }

        self.placing_order = true;
        let result = backend.checkout(session_id).await;
        self.placing_order = false;

        if let Err(e) = &result {
            warn!(
                error = %e,
                "Checkout failed on the backend; clearing cart and confirming anyway"
            );
            self.sync = self.sync.record_failure();
        }

        self.lines.clear();
        self.open = false;

        Some(CheckoutOutcome {
            backend: BackendAck::from_ok(result.is_ok()),
            confirmation: ORDER_CONFIRMATION,
        })
    }
}
