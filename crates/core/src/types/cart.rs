//! Cart contents as reported by the backend.

use serde::{Deserialize, Serialize};

use super::ProductId;
use super::de::null_as_default;

/// The backend's view of a session cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendCart {
    /// Cart lines. A cart that has never been touched may omit this field
    /// or send `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<BackendCartLine>,
}

/// A single line of a backend cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendCartLine {
    /// Product the line refers to.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: u32,
}
