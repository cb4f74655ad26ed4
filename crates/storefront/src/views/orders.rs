//! Order history view.

use askama::Template;
use shopease_core::Order;

use crate::orders::OrderHistory;

/// Order display data for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub status: String,
    pub total: String,
    pub item_count: usize,
    pub placed_at: Option<String>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            status: order.status.clone(),
            total: order.total.display(),
            item_count: order.item_count(),
            placed_at: order
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string()),
        }
    }
}

/// Order history template.
#[derive(Template)]
#[template(path = "orders/history.txt")]
pub struct OrderHistoryTemplate {
    pub orders: Vec<OrderView>,
}

impl From<&OrderHistory> for OrderHistoryTemplate {
    fn from(history: &OrderHistory) -> Self {
        Self {
            orders: history.orders().iter().map(OrderView::from).collect(),
        }
    }
}
