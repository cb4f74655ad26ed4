//! Catalog view state: the loaded products and their filtered view.

use shopease_core::{Product, ProductFilter, ProductId};
use tracing::{debug, instrument, warn};

use crate::api::Backend;

/// Locally held product list plus the subset currently shown.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    filtered: Vec<Product>,
    categories: Vec<String>,
    active_filter: ProductFilter,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every product from the last load.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products currently shown.
    #[must_use]
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// Categories for the filter bar.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Filter used for the last load.
    #[must_use]
    pub const fn active_filter(&self) -> &ProductFilter {
        &self.active_filter
    }

    /// Find a loaded product by identifier.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Query the backend and replace both lists with the response verbatim.
    ///
    /// Filtering is done server-side; the response is not re-filtered.
    /// On any failure both lists become empty.
    #[instrument(skip(self, backend))]
    pub async fn load(&mut self, backend: &impl Backend, filter: ProductFilter) {
        let result = backend.list_products(&filter).await;
        self.active_filter = filter;

        match result {
            Ok(products) => {
                debug!(count = products.len(), "Catalog loaded");
                self.filtered.clone_from(&products);
                self.products = products;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load catalog; showing no products");
                self.products.clear();
                self.filtered.clear();
            }
        }
    }

    /// Legacy client-side search over the loaded products.
    ///
    /// Case-insensitive substring match on title or description. Only the
    /// filtered view changes; an empty query shows everything.
    pub fn search_local(&mut self, query: &str) {
        let needle = query.to_lowercase();
        self.filtered = self
            .products
            .iter()
            .filter(|p| p.matches_text(&needle))
            .cloned()
            .collect();
    }

    /// Load the category list. Failure yields an empty list.
    #[instrument(skip(self, backend))]
    pub async fn load_categories(&mut self, backend: &impl Backend) {
        self.categories = match backend.list_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                warn!(error = %e, "Failed to load categories");
                Vec::new()
            }
        };
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopease_core::SortKey;

    use super::*;
    use crate::testing::{FakeBackend, Request, product};

    #[tokio::test]
    async fn test_filter_round_trip_is_one_verbatim_request() {
        // Server order deliberately differs from any client-side ordering.
        let backend = FakeBackend::new().with_products(vec![
            product("p2", "Trail Shoe", 4999),
            product("p1", "Canvas tote", 999),
        ]);
        let mut catalog = Catalog::new();

        let filter = ProductFilter::query("shoe").sorted_by(SortKey::PriceAsc);
        catalog.load(&backend, filter.clone()).await;

        assert_eq!(backend.requests(), vec![Request::ListProducts(filter.clone())]);
        let ids: Vec<_> = catalog.filtered().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert_eq!(catalog.products(), catalog.filtered());
        assert_eq!(catalog.active_filter(), &filter);
    }

    #[tokio::test]
    async fn test_failure_resets_both_lists() {
        let backend = FakeBackend::new().with_products(vec![product("p1", "Tote", 999)]);
        let mut catalog = Catalog::new();
        catalog.load(&backend, ProductFilter::default()).await;
        assert_eq!(catalog.products().len(), 1);

        backend.fail_all(true);
        catalog.load(&backend, ProductFilter::query("tote")).await;

        assert!(catalog.products().is_empty());
        assert!(catalog.filtered().is_empty());
    }

    #[tokio::test]
    async fn test_search_local_matches_title_or_description() {
        let mut tote = product("p1", "Canvas Tote", 999);
        tote.description = "Holds SHOES and more".to_string();
        let backend = FakeBackend::new().with_products(vec![
            tote,
            product("p2", "Trail Shoe", 4999),
            product("p3", "Wool Hat", 1500),
        ]);
        let mut catalog = Catalog::new();
        catalog.load(&backend, ProductFilter::default()).await;

        catalog.search_local("Shoe");
        let ids: Vec<_> = catalog.filtered().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert_eq!(catalog.products().len(), 3);

        catalog.search_local("");
        assert_eq!(catalog.filtered().len(), 3);

        // Purely local: only the initial load hit the backend.
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_categories_degrade_to_empty() {
        let backend = FakeBackend::new().with_categories(vec!["bags".into(), "shoes".into()]);
        let mut catalog = Catalog::new();
        catalog.load_categories(&backend).await;
        assert_eq!(catalog.categories(), ["bags", "shoes"]);

        backend.fail_all(true);
        catalog.load_categories(&backend).await;
        assert!(catalog.categories().is_empty());
    }
}
