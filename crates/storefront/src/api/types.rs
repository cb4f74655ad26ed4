//! Request bodies sent to the backend.

use serde::{Deserialize, Serialize};
use shopease_core::{ProductId, SessionId};

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub session_id: SessionId,
}

impl AddToCartRequest {
    /// Add one unit of `product_id`. The storefront only ever adds one.
    #[must_use]
    pub const fn single(product_id: ProductId, session_id: SessionId) -> Self {
        Self {
            product_id,
            quantity: 1,
            session_id,
        }
    }
}

/// Body of `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub session_id: SessionId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_cart_body() {
        let body = AddToCartRequest::single(ProductId::new("p1"), SessionId::new("s1"));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"product_id": "p1", "quantity": 1, "session_id": "s1"})
        );
    }

    #[test]
    fn test_checkout_body() {
        let body = CheckoutRequest {
            session_id: SessionId::new("s1"),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"session_id": "s1"})
        );
    }
}
