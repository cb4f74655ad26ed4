//! Order history view.

use shopease_core::{Order, SessionId};
use tracing::{instrument, warn};

use crate::api::Backend;

/// Past orders for the session. Read-only; no pagination or filtering.
#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    /// Fetch the session's orders. Failure yields an empty history.
    #[instrument(skip(backend), fields(session_id = %session_id))]
    pub async fn load(backend: &impl Backend, session_id: &SessionId) -> Self {
        let orders = backend
            .list_orders(session_id)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to load orders"))
            .unwrap_or_default();
        Self { orders }
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
