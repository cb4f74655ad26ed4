//! Type-safe price representation using decimal arithmetic.
//!
//! The ShopEase backend prices everything in a single currency and sends
//! amounts as plain JSON numbers, so `Price` is a thin wrapper over
//! [`Decimal`] that knows how to multiply by a quantity, sum, and format.

use core::fmt;
use core::iter::Sum;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store currency.
///
/// Serializes as a JSON number, like the backend; deserializes from a number
/// or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Currency symbol used when formatting.
    pub const SYMBOL: &'static str = "$";

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display with two decimals (e.g., "$19.98").
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", Self::SYMBOL, self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|p| p.0).sum())
    }
}
