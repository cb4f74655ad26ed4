//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::de::{either_id, null_as_default};
use super::{OrderId, Price, ProductId};

/// An order created by checkout. Read-only to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Backend identifier. Document stores send it as `_id`.
    pub id: OrderId,
    /// Opaque status string (e.g., "placed").
    pub status: String,
    /// Order total.
    pub total: Price,
    /// Lines captured at checkout.
    pub items: Vec<OrderLine>,
    /// When the order was placed, if the backend reports it.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct WireOrder {
    #[serde(default)]
    id: Option<OrderId>,
    #[serde(default, rename = "_id")]
    underscore_id: Option<OrderId>,
    #[serde(default, deserialize_with = "null_as_default")]
    status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    total: Price,
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<OrderLine>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireOrder::deserialize(deserializer)?;
        Ok(Self {
            id: either_id(wire.id, wire.underscore_id)?,
            status: wire.status,
            total: wire.total,
            items: wire.items,
            created_at: wire.created_at,
        })
    }
}

/// A line captured on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product the line refers to.
    pub product_id: ProductId,
    /// Number of units.
    #[serde(default = "default_quantity", deserialize_with = "quantity_or_one")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

fn quantity_or_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_quantity))
}

impl Order {
    /// Number of lines on the order.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
