//! Pricing wire responses.

use bookshop::line_items::ResolvedLineItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::pricing::models::PricingResult;

/// Priced line item as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    /// Book identifier
    pub book_id: String,

    /// Requested quantity
    pub quantity: u32,

    /// Unit price used for the line
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl From<ResolvedLineItem> for LineItemResponse {
    fn from(item: ResolvedLineItem) -> Self {
        Self {
            book_id: item.book_id.as_str().to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// Pricing result as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    /// `0` on success, `1` on an internal failure
    pub error_code: i32,

    /// Final price
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,

    /// Applied activity code, `0` when none
    pub activity_type: i32,

    /// Snapshot of the applied configuration, empty when none
    pub activity_info: String,

    /// Retained line items
    pub line_items: Vec<LineItemResponse>,

    /// Milliseconds since the Unix epoch
    pub computed_at_time: i64,
}

impl From<PricingResult> for PricingResponse {
    fn from(result: PricingResult) -> Self {
        let activity_type = result.activity_type();
        let activity_info = result.activity_info().to_string();

        Self {
            error_code: result.error_code.code(),
            total_price: result.total_price,
            activity_type,
            activity_info,
            line_items: result.line_items.into_iter().map(Into::into).collect(),
            computed_at_time: result.computed_at.as_millisecond(),
        }
    }
}
