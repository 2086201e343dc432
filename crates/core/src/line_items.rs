//! Line Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    books::{Book, BookId},
    discounts::{self, DiscountError},
};

/// A requested line that resolved to a sellable book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLineItem {
    /// Book identifier
    pub book_id: BookId,

    /// Requested quantity
    pub quantity: u32,

    /// Unit price at resolution time
    pub unit_price: Decimal,
}

impl ResolvedLineItem {
    /// Resolve a requested quantity against a looked-up book.
    ///
    /// Returns `None` when the book is not sellable at its current price.
    pub fn from_book(book: Book, quantity: u32) -> Option<Self> {
        book.is_priced().then(|| Self {
            book_id: book.id,
            quantity,
            unit_price: book.price,
        })
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the total is out of range.
    pub fn total(&self) -> Result<Decimal, DiscountError> {
        discounts::line_total(self.unit_price, self.quantity)
    }
}

/// Running un-discounted total of resolved line items, kept with the items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subtotal {
    amount: Decimal,
    items: Vec<ResolvedLineItem>,
}

impl Subtotal {
    /// Start an empty subtotal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolved line item to the subtotal.
    ///
    /// The item is only recorded when its total fits, so the amount always
    /// equals the sum of the recorded items.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the running total is out of range.
    pub fn push(&mut self, item: ResolvedLineItem) -> Result<(), DiscountError> {
        self.amount = discounts::add(self.amount, item.total()?)?;
        self.items.push(item);

        Ok(())
    }

    /// Current amount.
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Items recorded so far, in insertion order.
    pub fn items(&self) -> &[ResolvedLineItem] {
        &self.items
    }

    /// Split into amount and items.
    pub fn into_parts(self) -> (Decimal, Vec<ResolvedLineItem>) {
        (self.amount, self.items)
    }
}
