//! Books

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Book identifier as supplied by carts and catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(#[serde(deserialize_with = "crate::ids::string_or_integer")] String);

impl BookId {
    /// Create a book identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BookId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A book and its current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Book identifier
    pub id: BookId,

    /// Current unit price
    pub price: Decimal,
}

impl Book {
    /// Create a book with the given price.
    pub fn new(id: impl Into<BookId>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            price,
        }
    }

    /// Whether the book can be sold at its current price.
    ///
    /// Books priced at zero or below are treated as unpriced.
    pub fn is_priced(&self) -> bool {
        self.price > Decimal::ZERO
    }
}
