//! Catalog search, filter and sort parameters.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Price;

/// Error returned when parsing an unknown sort key.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort key '{0}' (expected relevance, price_asc, price_desc or rating_desc)")]
pub struct SortKeyError(String);

/// Catalog ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Backend default ordering. Never sent on the wire.
    #[default]
    Relevance,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Best rated first.
    RatingDesc,
}

impl SortKey {
    /// Wire value, or `None` for the backend default.
    #[must_use]
    pub const fn as_query_value(self) -> Option<&'static str> {
        match self {
            Self::Relevance => None,
            Self::PriceAsc => Some("price_asc"),
            Self::PriceDesc => Some("price_desc"),
            Self::RatingDesc => Some("rating_desc"),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::RatingDesc => "Avg. Customer Review",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value().unwrap_or("relevance"))
    }
}

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "relevance" => Ok(Self::Relevance),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "rating_desc" => Ok(Self::RatingDesc),
            other => Err(SortKeyError(other.to_string())),
        }
    }
}

/// Filter bar state sent to `GET /products`.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Free-text query.
    pub query: Option<String>,
    /// Category name.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Price>,
    /// Inclusive upper price bound.
    pub max_price: Option<Price>,
    /// Ordering.
    pub sort: SortKey,
}

impl ProductFilter {
    /// Filter with only a text query.
    #[must_use]
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            query: Some(q.into()),
            ..Self::default()
        }
    }

    /// Set the sort key.
    #[must_use]
    pub const fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Query-string pairs, in a stable order, omitting unset values.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(q) = non_empty(self.query.as_deref()) {
            pairs.push(("q", q.to_string()));
        }
        if let Some(category) = non_empty(self.category.as_deref()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.amount().to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.amount().to_string()));
        }
        if let Some(sort) = self.sort.as_query_value() {
            pairs.push(("sort", sort.to_string()));
        }

        pairs
    }

    /// Whether the filter would send no parameters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_shoe_price_asc() {
        let filter = ProductFilter::query("shoe").sorted_by(SortKey::PriceAsc);
        assert_eq!(
            filter.query_pairs(),
            vec![("q", "shoe".to_string()), ("sort", "price_asc".to_string())]
        );
    }

    #[test]
    fn test_default_filter_is_empty() {
        assert!(ProductFilter::default().is_empty());
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let filter = ProductFilter {
            query: Some(String::new()),
            category: Some(String::new()),
            ..ProductFilter::default()
        };
        assert!(filter.is_empty());
    }

    #[test]
    fn test_price_bounds_encode_as_plain_numbers() {
        let filter = ProductFilter {
            category: Some("shoes".to_string()),
            min_price: Some(Price::from_cents(1000)),
            max_price: Some(Price::from_cents(4999)),
            sort: SortKey::RatingDesc,
            ..ProductFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("category", "shoes".to_string()),
                ("min_price", "10.00".to_string()),
                ("max_price", "49.99".to_string()),
                ("sort", "rating_desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::Relevance);
        assert_eq!("price_desc".parse::<SortKey>().unwrap(), SortKey::PriceDesc);
        assert!("cheapest".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Relevance.to_string(), "relevance");
    }
}
