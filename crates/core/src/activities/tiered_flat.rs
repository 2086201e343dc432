//! Tiered Flat Amount Activity
//!
//! Spend-based tiers that each carry an amount taken off the subtotal
//! (e.g. spend 100 get 10 off, spend 200 get 30 off).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    activities::{
        ActivityId, ConfigError,
        tiers::{self, Tier},
    },
    discounts::{self, DiscountError},
};

/// Stored tier of a tiered flat amount activity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlatLevelRecord {
    /// Minimum subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Decimal>,

    /// Amount taken off the subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Decimal>,
}

impl FlatLevelRecord {
    /// Create a complete tier record.
    pub const fn new(threshold: Decimal, discount_amount: Decimal) -> Self {
        Self {
            threshold: Some(threshold),
            discount_amount: Some(discount_amount),
        }
    }
}

/// Stored configuration of a tiered flat amount activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredFlatActivity {
    /// Activity identifier
    pub id: ActivityId,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tiers, expected ascending by threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<FlatLevelRecord>>,
}

impl TieredFlatActivity {
    /// Create an activity from complete tier records.
    pub fn new(id: impl Into<ActivityId>, levels: Vec<FlatLevelRecord>) -> Self {
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

                let discount_amount =
                    level
                        .discount_amount
                        .ok_or(ConfigError::MissingLevelField {
                            index,
                            field: "discount_amount",
                        })?;

                Ok(Tier::new(threshold, discount_amount))
            })
            .collect()
    }
}

/// Select the discount amount for `subtotal`; `0` when no tier qualifies.
pub fn discount_amount(tiers: &[Tier], subtotal: Decimal) -> Decimal {
    tiers::select(tiers, subtotal, Decimal::ZERO)
}

/// Take a discount amount off the subtotal.
///
/// Amounts within `[0, subtotal]` are subtracted; anything else leaves the
/// subtotal unchanged, so the result is never negative.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the difference is out of range.
pub fn apply(subtotal: Decimal, amount: Decimal) -> Result<Decimal, DiscountError> {
    if amount >= Decimal::ZERO && amount <= subtotal {
        discounts::sub(subtotal, amount)
    } else {
        Ok(subtotal)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn activity() -> TieredFlatActivity {
        TieredFlatActivity::new(
            "spring",
            vec![
                FlatLevelRecord::new(dec!(100), dec!(10)),
                FlatLevelRecord::new(dec!(200), dec!(30)),
            ],
        )
    }

    #[test]
    fn higher_qualifying_tier_sets_amount() -> TestResult {
        let tiers = activity().tiers()?;
        let amount = discount_amount(&tiers, dec!(250));

        assert_eq!(amount, dec!(30));
        assert_eq!(apply(dec!(250), amount)?, dec!(220));

        Ok(())
    }

    #[test]
    fn amount_above_subtotal_is_ignored() -> TestResult {
        let tiers = [Tier::new(Decimal::ZERO, dec!(50))];
        let amount = discount_amount(&tiers, dec!(40));

        assert_eq!(apply(dec!(40), amount)?, dec!(40));

        Ok(())
    }

    #[test]
    fn amount_equal_to_subtotal_prices_at_zero() -> TestResult {
        assert_eq!(apply(dec!(40), dec!(40))?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn negative_amount_is_ignored() -> TestResult {
        assert_eq!(apply(dec!(40), dec!(-5))?, dec!(40));

        Ok(())
    }

    #[test]
    fn result_is_never_negative() -> TestResult {
        let tiers = activity().tiers()?;

        for subtotal in [dec!(0), dec!(5), dec!(100), dec!(199.99), dec!(200), dec!(10000)] {
            let price = apply(subtotal, discount_amount(&tiers, subtotal))?;

            assert!(price >= Decimal::ZERO, "subtotal {subtotal} priced at {price}");
        }

        Ok(())
    }

    #[test]
    fn missing_threshold_reports_index() {
        let activity = TieredFlatActivity {
            id: ActivityId::from("broken"),
            name: None,
            levels: Some(vec![FlatLevelRecord {
                threshold: None,
                discount_amount: Some(dec!(5)),
            }]),
        };

        assert_eq!(
            activity.tiers(),
            Err(ConfigError::MissingLevelField {
                index: 0,
                field: "threshold"
            })
        );
    }
}
