//! Bookshop
//!
//! Checkout pricing for bookshop carts: line-item resolution helpers and the
//! discount math behind the tiered-percentage, tiered-flat-amount and bundle
//! activities. This crate performs no I/O; lookups are the caller's concern.

pub mod activities;
pub mod books;
pub mod cart;
pub mod discounts;
pub mod line_items;

mod ids;
