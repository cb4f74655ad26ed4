//! Catalog product as served by the backend.

use serde::{Deserialize, Deserializer, Serialize};

use super::de::{either_id, null_as_default};
use super::{Price, ProductId};

/// Rating shown for products the backend has not rated yet.
pub const DEFAULT_DISPLAY_RATING: f64 = 4.0;

/// A product in the catalog.
///
/// Products are owned by the backend; the client never mutates them.
/// Serializes with an `id` key; deserializes from `id`, `_id`, or both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Backend identifier. Document stores send it as `_id`.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image URL, if the product has one.
    pub image_url: Option<String>,
    /// Average customer rating.
    pub rating: Option<f64>,
    /// Number of customer reviews.
    pub reviews_count: Option<u32>,
    /// Category name.
    pub category: Option<String>,
}

/// Product as it appears on the wire.
#[derive(Deserialize)]
struct WireProduct {
    #[serde(default)]
    id: Option<ProductId>,
    #[serde(default, rename = "_id")]
    underscore_id: Option<ProductId>,
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    price: Price,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    reviews_count: Option<u32>,
    #[serde(default)]
    category: Option<String>,
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireProduct::deserialize(deserializer)?;
        Ok(Self {
            id: either_id(wire.id, wire.underscore_id)?,
            title: wire.title,
            description: wire.description,
            price: wire.price,
            image_url: wire.image_url,
            rating: wire.rating,
            reviews_count: wire.reviews_count,
            category: wire.category,
        })
    }
}

impl Product {
    /// Rating to display, falling back to [`DEFAULT_DISPLAY_RATING`].
    #[must_use]
    pub fn display_rating(&self) -> f64 {
        self.rating.unwrap_or(DEFAULT_DISPLAY_RATING)
    }

    /// Case-insensitive substring match against title or description.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_accepts_underscore_id() {
        let product: Product = serde_json::from_str(
            r#"{"_id": "65f0", "title": "Trail Shoe", "price": 59.5}"#,
        )
        .unwrap();
        assert_eq!(product.id.as_str(), "65f0");
        assert_eq!(product.description, "");
        assert!(product.image_url.is_none());
        assert!((product.display_rating() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_full_payload() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "p1",
                "title": "Canvas Tote",
                "description": "Sturdy bag",
                "price": 9.99,
                "image_url": "https://img.example/tote.jpg",
                "rating": 4.6,
                "reviews_count": 12,
                "category": "bags"
            }"#,
        )
        .unwrap();
        assert_eq!(product.price, Price::from_cents(999));
        assert_eq!(product.reviews_count, Some(12));
        assert_eq!(product.category.as_deref(), Some("bags"));
    }

    #[test]
    fn test_product_tolerates_null_optionals() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "p1",
                "title": "Tote",
                "description": null,
                "price": 9.99,
                "image_url": null,
                "rating": null,
                "reviews_count": null,
                "category": null
            }"#,
        )
        .unwrap();
        assert_eq!(product.description, "");
        assert!(product.rating.is_none());
        assert!(product.category.is_none());
    }

    #[test]
    fn test_product_with_both_id_keys() {
        let product: Product = serde_json::from_str(
            r#"{"_id": "65f0", "id": "65f0", "title": "Tote", "price": 9.99}"#,
        )
        .unwrap();
        assert_eq!(product.id.as_str(), "65f0");
    }

    #[test]
    fn test_product_with_numeric_id() {
        let products: Vec<Product> =
            serde_json::from_str(r#"[{"id": 1, "title": "Tote", "price": 9.99}]"#).unwrap();
        assert_eq!(products[0].id.as_str(), "1");
    }

    #[test]
    fn test_product_without_id_is_rejected() {
        let err = serde_json::from_str::<Product>(r#"{"title": "Tote", "price": 9.99}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn test_serializes_with_id_key() {
        let product: Product =
            serde_json::from_str(r#"{"_id": "p1", "title": "Tote", "price": 9.99}"#).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], "p1");
        assert!((value["price"].as_f64().unwrap() - 9.99).abs() < 1e-9);
    }

    #[test]
    fn test_matches_text_is_case_insensitive() {
        let product: Product = serde_json::from_str(
            r#"{"id": "p1", "title": "Running SHOE", "description": "Light mesh", "price": 1}"#,
        )
        .unwrap();
        assert!(product.matches_text("shoe"));
        assert!(product.matches_text("mesh"));
        assert!(!product.matches_text("boot"));
    }
}
