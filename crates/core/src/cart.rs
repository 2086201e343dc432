//! Cart Requests

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::books::BookId;

/// A requested book identifier appeared more than once in a single cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("book {book_id} appears more than once in the cart")]
pub struct DuplicateBook {
    /// The repeated identifier
    pub book_id: BookId,
}

/// One requested line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    /// Requested book
    pub book_id: BookId,

    /// Requested quantity
    pub quantity: u32,
}

impl LineRequest {
    /// Create a line request.
    pub fn new(book_id: impl Into<BookId>, quantity: u32) -> Self {
        Self {
            book_id: book_id.into(),
            quantity,
        }
    }
}

/// A cart to be priced, with the activity the shopper selected.
///
/// `activity_type` is the raw activity code; `0` and any unrecognised code
/// price the cart without an activity, in which case `activity_id` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    /// Raw activity code
    #[serde(default)]
    pub activity_type: i32,

    /// Activity identifier
    #[serde(default)]
    pub activity_id: String,

    /// Requested lines, in shopper order
    #[serde(default)]
    pub lines: Vec<LineRequest>,
}

impl CartRequest {
    /// Create a cart request without an activity.
    pub fn new(lines: impl Into<Vec<LineRequest>>) -> Self {
        Self {
            activity_type: 0,
            activity_id: String::new(),
            lines: lines.into(),
        }
    }

    /// Select an activity for this cart.
    #[must_use]
    pub fn with_activity(mut self, activity_type: i32, activity_id: impl Into<String>) -> Self {
        self.activity_type = activity_type;
        self.activity_id = activity_id.into();
        self
    }

    /// Check that every requested book appears at most once.
    ///
    /// Lines are scanned in order, so the reported book is the first repeat.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateBook`] for the first identifier seen twice.
    pub fn ensure_unique_books(&self) -> Result<(), DuplicateBook> {
        let mut seen = FxHashSet::default();

        self.lines.iter().try_for_each(|line| {
            if seen.insert(&line.book_id) {
                Ok(())
            } else {
                Err(DuplicateBook {
                    book_id: line.book_id.clone(),
                })
            }
        })
    }
}
