//! Threshold Tiers
//!
//! Shared tier selection for the tiered activities. Tiers are walked in the
//! order they were stored; the walk stops at the first tier whose threshold
//! exceeds the subtotal, and each tier passed before that overwrites the
//! selected value. With tiers stored ascending this selects the highest
//! threshold not above the subtotal. Unsorted tiers are not reordered.

use rust_decimal::Decimal;

/// A validated threshold tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Minimum subtotal for this tier to apply
    pub threshold: Decimal,

    /// Factor or amount granted by this tier
    pub value: Decimal,
}

impl Tier {
    /// Create a tier.
    pub const fn new(threshold: Decimal, value: Decimal) -> Self {
        Self { threshold, value }
    }
}

/// Select the value of the qualifying tier for `subtotal`, or `default` when none qualifies.
pub fn select(tiers: &[Tier], subtotal: Decimal, default: Decimal) -> Decimal {
    tiers
        .iter()
        .take_while(|tier| tier.threshold <= subtotal)
        .last()
        .map_or(default, |tier| tier.value)
}
