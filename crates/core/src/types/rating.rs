//! Review star rating.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value is outside the 1-5 star scale.
    #[error("rating must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Smallest allowed value.
        min: u8,
        /// Largest allowed value.
        max: u8,
        /// The rejected value.
        value: i64,
    },

    /// The input is not a whole number.
    #[error("rating must be a whole number (got {0:?})")]
    NotANumber(String),
}

/// A whole-star review rating between 1 and 5.
///
/// ## Examples
///
/// ```
/// use shopease_core::Rating;
///
/// assert!(Rating::new(5).is_ok());
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating, and the default for a fresh review form.
    pub const MAX: u8 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if `value` is not within 1-5.
    pub fn new(value: i64) -> Result<Self, RatingError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                value,
            })
    }

    /// The rating as a number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::str::FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| RatingError::NotANumber(trimmed.to_owned()))?;
        Self::new(value)
    }
}
