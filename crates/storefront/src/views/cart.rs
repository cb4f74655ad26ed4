//! Cart drawer view.

use askama::Template;

use crate::cart::{Cart, CartLine, CartSync};

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image_url: Option<String>,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: usize,
    pub open: bool,
    pub checkout_enabled: bool,
    pub checkout_label: &'static str,
    pub sync_note: Option<String>,
}

impl CartView {
    /// Create an empty, closed cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.line_count(),
            open: cart.is_open(),
            checkout_enabled: cart.can_checkout(),
            checkout_label: if cart.is_placing_order() {
                "Placing order..."
            } else {
                "Proceed to Buy"
            },
            sync_note: match cart.sync() {
                CartSync::InSync => None,
                CartSync::Diverged { failed_requests } => Some(format!(
                    "{failed_requests} change(s) not confirmed by the store"
                )),
            },
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id.to_string(),
            title: line.product.title.clone(),
            quantity: line.quantity,
            price: line.product.price.display(),
            line_price: line.line_total().display(),
            image_url: line.product.image_url.clone(),
        }
    }
}

/// Cart drawer template.
#[derive(Template)]
#[template(path = "cart/drawer.txt")]
pub struct CartDrawerTemplate<'a> {
    pub cart: &'a CartView,
}

/// Cart button badge template.
#[derive(Template)]
#[template(source = "Cart ({{ count }})", ext = "txt")]
pub struct CartBadgeTemplate {
    pub count: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{Endpoint, FakeBackend, product, session};

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::empty();
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
        assert!(!view.checkout_enabled);

        let text = CartDrawerTemplate { cart: &view }.render().unwrap();
        assert!(text.contains("Your cart is empty."));
        assert!(text.contains("Subtotal: $0.00"));
        assert!(text.contains("[disabled]"));
    }

    #[tokio::test]
    async fn test_cart_view_lines_and_subtotal() {
        let backend = FakeBackend::new();
        let mut cart = Cart::new();
        let p1 = product("p1", "Canvas Tote", 999);
        cart.add(&backend, &session(), &p1).await;
        cart.add(&backend, &session(), &p1).await;

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].price, "$9.99");
        assert_eq!(view.items[0].line_price, "$19.98");
        assert_eq!(view.subtotal, "$19.98");
        assert!(view.open);

        let text = CartDrawerTemplate { cart: &view }.render().unwrap();
        assert!(text.contains("Canvas Tote"));
        assert!(text.contains("Qty: 2"));
        assert!(text.contains("Subtotal: $19.98"));
        assert!(text.contains("Proceed to Buy"));
        assert!(!text.contains("[disabled]"));
    }

    #[tokio::test]
    async fn test_diverged_cart_shows_note() {
        let backend = FakeBackend::new();
        backend.fail(Endpoint::AddToCart);
        let mut cart = Cart::new();
        cart.add(&backend, &session(), &product("p1", "Tote", 999)).await;

        let view = CartView::from(&cart);
        let note = view.sync_note.clone().unwrap();
        assert!(note.starts_with("1 change(s)"));

        let text = CartDrawerTemplate { cart: &view }.render().unwrap();
        assert!(text.contains(&note));
    }

    #[test]
    fn test_badge() {
        let text = CartBadgeTemplate { count: 3 }.render().unwrap();
        assert_eq!(text, "Cart (3)");
    }
}
