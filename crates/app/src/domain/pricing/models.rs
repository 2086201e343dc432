//! Pricing Models

use bookshop::{activities::ActivityKind, line_items::ResolvedLineItem};
use jiff::Timestamp;
use rust_decimal::Decimal;

/// Outcome code carried by a populated pricing result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The cart was priced as requested.
    Success,

    /// Pricing stopped early because storage failed or the activity
    /// configuration was unusable. Both causes share this code.
    Internal,
}

impl ErrorCode {
    /// Wire code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Internal => 1,
        }
    }
}

/// The activity whose discount was applied to a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedActivity {
    /// Kind of the applied activity
    pub kind: ActivityKind,

    /// Serialized configuration as it was applied
    pub snapshot: String,
}

/// Price of a cart at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    /// Outcome code
    pub error_code: ErrorCode,

    /// Final price after any discount
    pub total_price: Decimal,

    /// Activity applied to the total, if any
    pub applied_activity: Option<AppliedActivity>,

    /// Retained line items, in request order
    pub line_items: Vec<ResolvedLineItem>,

    /// Point in time the cart was priced at
    pub computed_at: Timestamp,
}

impl PricingResult {
    /// A successful result without an applied activity.
    pub fn base(
        total_price: Decimal,
        line_items: Vec<ResolvedLineItem>,
        computed_at: Timestamp,
    ) -> Self {
        Self {
            error_code: ErrorCode::Success,
            total_price,
            applied_activity: None,
            line_items,
            computed_at,
        }
    }

    /// Mark the result as degraded by an internal failure.
    ///
    /// The activity is dropped; the total and line items computed so far stay.
    #[must_use]
    pub fn degraded(mut self) -> Self {
        self.error_code = ErrorCode::Internal;
        self.applied_activity = None;
        self
    }

    /// Wire activity code; `0` when no activity was applied.
    pub fn activity_type(&self) -> i32 {
        self.applied_activity
            .as_ref()
            .map_or(0, |activity| activity.kind.code())
    }

    /// Applied configuration snapshot; empty when no activity was applied.
    pub fn activity_info(&self) -> &str {
        self.applied_activity
            .as_ref()
            .map_or("", |activity| activity.snapshot.as_str())
    }
}
