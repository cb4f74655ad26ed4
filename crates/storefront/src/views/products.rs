//! Product grid and product detail views.

use askama::Template;
use shopease_core::{Product, ProductFilter, Review, SortKey};

use crate::product_detail::ProductDetail;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub rating: String,
    pub reviews_line: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            rating: format!("{:.1}", product.display_rating()),
            reviews_line: product.reviews_count.map(|n| match n {
                1 => "1 review".to_string(),
                n => format!("{n} reviews"),
            }),
            image_url: product.image_url.clone(),
            category: product.category.clone().filter(|c| !c.is_empty()),
        }
    }
}

/// Review display data for templates.
#[derive(Debug, Clone)]
pub struct ReviewView {
    pub user_name: String,
    pub rating: String,
    pub comment: Option<String>,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        let stars = usize::from(review.rating.stars());
        Self {
            user_name: review.user_name.clone(),
            rating: format!("{}{}", "*".repeat(stars), "-".repeat(5 - stars)),
            comment: review.visible_comment().map(str::to_string),
        }
    }
}

/// One-line description of the active filter, empty when nothing is set.
#[must_use]
pub fn filter_summary(filter: &ProductFilter) -> String {
    let mut parts = Vec::new();
    if let Some(q) = filter.query.as_deref().filter(|q| !q.is_empty()) {
        parts.push(format!("search \"{q}\""));
    }
    if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("in {category}"));
    }
    match (filter.min_price, filter.max_price) {
        (Some(min), Some(max)) => parts.push(format!("{min} to {max}")),
        (Some(min), None) => parts.push(format!("from {min}")),
        (None, Some(max)) => parts.push(format!("up to {max}")),
        (None, None) => {}
    }
    if filter.sort != SortKey::Relevance {
        parts.push(format!("sorted by {}", filter.sort.label()));
    }
    parts.join(", ")
}

/// Product grid template.
#[derive(Template)]
#[template(path = "products/grid.txt")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductView>,
    pub filter_summary: String,
}

impl ProductGridTemplate {
    #[must_use]
    pub fn new(products: &[Product], filter: &ProductFilter) -> Self {
        Self {
            products: products.iter().map(ProductView::from).collect(),
            filter_summary: filter_summary(filter),
        }
    }
}

/// Product detail template.
#[derive(Template)]
#[template(path = "products/detail.txt")]
pub struct ProductDetailTemplate {
    pub product_id: String,
    pub product: Option<ProductView>,
    pub reviews: Vec<ReviewView>,
}

impl From<&ProductDetail> for ProductDetailTemplate {
    fn from(detail: &ProductDetail) -> Self {
        Self {
            product_id: detail.product_id().to_string(),
            product: detail.product().map(ProductView::from),
            reviews: detail.reviews().iter().map(ReviewView::from).collect(),
        }
    }
}
