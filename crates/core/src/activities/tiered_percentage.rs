//! Tiered Percentage Activity
//!
//! Spend-based tiers that each carry a discount factor (e.g. spend 100 to pay
//! 90%, spend 200 to pay 80%). The factor of the qualifying tier multiplies
//! the subtotal and the result is rounded down.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    activities::{
        ActivityId, ConfigError,
        tiers::{self, Tier},
    },
    discounts::{self, DiscountError},
};

/// Stored tier of a tiered percentage activity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PercentageLevelRecord {
    /// Minimum subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Decimal>,

    /// Fraction of the subtotal the shopper pays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_factor: Option<Decimal>,
}

impl PercentageLevelRecord {
    /// Create a complete tier record.
    pub const fn new(threshold: Decimal, discount_factor: Decimal) -> Self {
        Self {
            threshold: Some(threshold),
            discount_factor: Some(discount_factor),
        }
    }
}

/// Stored configuration of a tiered percentage activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredPercentageActivity {
    /// Activity identifier
    pub id: ActivityId,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tiers, expected ascending by threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<PercentageLevelRecord>>,
}

impl TieredPercentageActivity {
    /// Create an activity from complete tier records.
    pub fn new(id: impl Into<ActivityId>, levels: Vec<PercentageLevelRecord>) -> Self {
        Self {
            id: id.into(),
            name: None,
            levels: Some(levels),
        }
    }

    /// Validate the stored tiers, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the tier list or a tier field is missing.
    pub fn tiers(&self) -> Result<Vec<Tier>, ConfigError> {
        let levels = self
            .levels
            .as_deref()
            .ok_or(ConfigError::MissingList("levels"))?;

        levels
            .iter()
            .enumerate()
            .map(|(index, level)| {
                let threshold = level.threshold.ok_or(ConfigError::MissingLevelField {
                    index,
                    field: "threshold",
                })?;

                let discount_factor =
                    level
                        .discount_factor
                        .ok_or(ConfigError::MissingLevelField {
                            index,
                            field: "discount_factor",
                        })?;

                Ok(Tier::new(threshold, discount_factor))
            })
            .collect()
    }
}

/// Select the discount factor for `subtotal`; `1` when no tier qualifies.
pub fn discount_factor(tiers: &[Tier], subtotal: Decimal) -> Decimal {
    tiers::select(tiers, subtotal, Decimal::ONE)
}

/// Apply a discount factor to the subtotal.
///
/// Factors within `[0, 1]` scale the subtotal, rounding down. Factors outside
/// that range are ignored and the subtotal is returned unchanged.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the scaled amount is out of range.
pub fn apply(subtotal: Decimal, factor: Decimal) -> Result<Decimal, DiscountError> {
    if (Decimal::ZERO..=Decimal::ONE).contains(&factor) {
        discounts::floor_scaled(subtotal, factor)
    } else {
        Ok(subtotal)
    }
}
