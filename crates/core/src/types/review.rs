//! Customer reviews.

use serde::{Deserialize, Serialize};

use super::{ProductId, Rating};

/// A review as read back from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewed product.
    pub product_id: ProductId,
    /// Author display name.
    pub user_name: String,
    /// Star rating.
    pub rating: Rating,
    /// Free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
}

impl Review {
    /// The comment, if it is present and non-empty.
    #[must_use]
    pub fn visible_comment(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }
}

/// A review being written by the customer.
///
/// Serializes to the `POST /reviews` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    /// Reviewed product.
    pub product_id: ProductId,
    /// Author display name. Must be non-empty to submit.
    pub user_name: String,
    /// Star rating.
    pub rating: Rating,
    /// Comment text; may be empty.
    pub comment: String,
}

impl ReviewDraft {
    /// A fresh draft: no name, five stars, no comment.
    #[must_use]
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            user_name: String::new(),
            rating: Rating::default(),
            comment: String::new(),
        }
    }

    /// Whether the draft carries everything required to submit.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.user_name.is_empty()
    }
}
