//! Product detail view: one product, its reviews, and the review form.

use shopease_core::{Product, ProductId, Rating, Review, ReviewDraft};
use tracing::{debug, instrument, warn};

use crate::api::Backend;

/// What happened to a review submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSubmission {
    /// The form was incomplete; nothing was sent.
    Skipped,
    /// The review was posted and the list re-fetched.
    Posted,
    /// The post failed; the list was still re-fetched.
    Failed,
}

/// State of an open product detail panel.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    product_id: ProductId,
    product: Option<Product>,
    reviews: Vec<Review>,
    form: ReviewDraft,
}

impl ProductDetail {
    /// Open the detail panel for `product_id`, fetching the product and its
    /// reviews concurrently.
    ///
    /// A failed product fetch leaves the product absent; a failed review fetch
    /// yields no reviews.
    #[instrument(skip(backend))]
    pub async fn open(backend: &impl Backend, product_id: ProductId) -> Self {
        let (product, reviews) = tokio::join!(
            backend.get_product(&product_id),
            backend.list_reviews(&product_id)
        );

        let product = product
            .inspect_err(|e| warn!(error = %e, "Failed to load product"))
            .ok();
        let reviews = reviews
            .inspect_err(|e| warn!(error = %e, "Failed to load reviews"))
            .unwrap_or_default();

        Self {
            form: ReviewDraft::new(product_id.clone()),
            product_id,
            product,
            reviews,
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// The product, once loaded.
    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// The review being written.
    #[must_use]
    pub const fn form(&self) -> &ReviewDraft {
        &self.form
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.form.user_name = name.into();
    }

    pub const fn set_rating(&mut self, rating: Rating) {
        self.form.rating = rating;
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.form.comment = comment.into();
    }

    /// Submit the review form.
    ///
    /// An empty author name is a no-op with no request. Otherwise the review
    /// is posted, the form reset, and the full review list re-fetched; the
    /// new review is never inserted locally.
    #[instrument(skip(self, backend), fields(product_id = %self.product_id))]
    pub async fn submit_review(&mut self, backend: &impl Backend) -> ReviewSubmission {
        if !self.form.is_submittable() {
            debug!("Review form incomplete; not submitting");
            return ReviewSubmission::Skipped;
        }

        let outcome = match backend.submit_review(&self.form).await {
            Ok(()) => ReviewSubmission::Posted,
            Err(e) => {
                warn!(error = %e, "Failed to post review");
                ReviewSubmission::Failed
            }
        };

        self.form = ReviewDraft::new(self.product_id.clone());
        self.reload_reviews(backend).await;
        outcome
    }

    async fn reload_reviews(&mut self, backend: &impl Backend) {
        self.reviews = match backend.list_reviews(&self.product_id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!(error = %e, "Failed to reload reviews");
                Vec::new()
            }
        };
    }
}
