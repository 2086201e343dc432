//! Bundle Activity
//!
//! "Buy `by`, get `give` free" rules scoped to a set of books. Every rule
//! that lists a book contributes its own discount for that book's line, so
//! overlapping rules stack without a cap. The total discount is not bounded
//! by the subtotal and can price a cart below zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    activities::{ActivityId, ConfigError},
    books::BookId,
    discounts::DiscountError,
};

/// Stored bundle rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BundleRuleRecord {
    /// Eligible books
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_ids: Option<Vec<BookId>>,

    /// Quantity that must be bought per free set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<i64>,

    /// Quantity given free per set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub give: Option<i64>,
}

impl BundleRuleRecord {
    /// Create a complete rule record.
    pub fn new(book_ids: impl IntoIterator<Item = impl Into<BookId>>, by: i64, give: i64) -> Self {
        Self {
            book_ids: Some(book_ids.into_iter().map(Into::into).collect()),
            by: Some(by),
            give: Some(give),
        }
    }
}

/// Stored configuration of a bundle activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleActivity {
    /// Activity identifier
    pub id: ActivityId,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Bundle rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<BundleRuleRecord>>,
}

impl BundleActivity {
    /// Create an activity from complete rule records.
    pub fn new(id: impl Into<ActivityId>, rules: Vec<BundleRuleRecord>) -> Self {
        Self {
            id: id.into(),
            name: None,
            rules: Some(rules),
        }
    }

    /// Validate the stored rules, keeping their order.
    ///
    /// Non-positive `by` or `give` values are valid here; such rules are
    /// inactive and skipped when discounting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the rule list or a rule field is missing.
    pub fn rules(&self) -> Result<Vec<BundleRule>, ConfigError> {
        let rules = self
            .rules
            .as_deref()
            .ok_or(ConfigError::MissingList("rules"))?;

        rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                let book_ids = rule.book_ids.as_deref().ok_or(ConfigError::MissingRuleField {
                    index,
                    field: "book_ids",
                })?;

                let by = rule
                    .by
                    .ok_or(ConfigError::MissingRuleField { index, field: "by" })?;

                let give = rule.give.ok_or(ConfigError::MissingRuleField {
                    index,
                    field: "give",
                })?;

                Ok(BundleRule {
                    book_ids: book_ids.iter().cloned().collect(),
                    by,
                    give,
                })
            })
            .collect()
    }
}

/// A validated bundle rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRule {
    book_ids: SmallVec<[BookId; 4]>,
    by: i64,
    give: i64,
}

impl BundleRule {
    /// Whether `book` is eligible under this rule.
    pub fn covers(&self, book: &BookId) -> bool {
        self.book_ids.contains(book)
    }

    /// Whether this rule can grant a discount at all.
    pub const fn is_active(&self) -> bool {
        self.by > 0 && self.give > 0
    }

    /// Discount granted for `quantity` copies priced at `unit_price`:
    /// `unit_price × floor(quantity / by) × give`.
    ///
    /// Inactive rules grant nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the discount is out of range.
    pub fn discount(&self, unit_price: Decimal, quantity: u32) -> Result<Decimal, DiscountError> {
        if !self.is_active() {
            return Ok(Decimal::ZERO);
        }

        let sets = i64::from(quantity) / self.by;

        unit_price
            .checked_mul(Decimal::from(sets))
            .and_then(|discount| discount.checked_mul(Decimal::from(self.give)))
            .ok_or(DiscountError::Overflow)
    }
}

/// Active rules covering `book`, in stored order.
pub fn active_rules_for<'r>(
    rules: &'r [BundleRule],
    book: &'r BookId,
) -> impl Iterator<Item = &'r BundleRule> + 'r {
    rules
        .iter()
        .filter(move |rule| rule.covers(book) && rule.is_active())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    fn rule(book_ids: &[&str], by: i64, give: i64) -> TestResult<BundleRule> {
        let activity = BundleActivity::new(
            "bundle",
            vec![BundleRuleRecord::new(book_ids.iter().copied(), by, give)],
        );

        Ok(activity
            .rules()?
            .into_iter()
            .next()
            .ok_or("rule should be present")?)
    }

    #[test]
    fn buy_three_get_one() -> TestResult {
        let rule = rule(&["b1"], 3, 1)?;

        assert_eq!(rule.discount(dec!(20), 7)?, dec!(40));
        assert_eq!(rule.discount(dec!(20), 2)?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn discount_can_exceed_line_total() -> TestResult {
        let rule = rule(&["b1"], 1, 5)?;

        assert_eq!(rule.discount(dec!(20), 10)?, dec!(1000));

        Ok(())
    }

    #[test]
    fn non_positive_by_or_give_is_inactive() -> TestResult {
        for (by, give) in [(0, 1), (-2, 1), (2, 0), (2, -1)] {
            let rule = rule(&["b1"], by, give)?;

            assert!(!rule.is_active(), "by {by} give {give}");
            assert_eq!(rule.discount(dec!(20), 10)?, Decimal::ZERO);
        }

        Ok(())
    }

    #[test]
    fn active_rules_for_filters_by_book_and_activity() -> TestResult {
        let activity = BundleActivity::new(
            "bundle",
            vec![
                BundleRuleRecord::new(["b1", "b2"], 2, 1),
                BundleRuleRecord::new(["b2"], 3, 1),
                BundleRuleRecord::new(["b1"], 0, 1),
            ],
        );

        let rules = activity.rules()?;
        let b1 = BookId::from("b1");
        let b2 = BookId::from("b2");
        let b3 = BookId::from("b3");

        assert_eq!(active_rules_for(&rules, &b1).count(), 1);
        assert_eq!(active_rules_for(&rules, &b2).count(), 2);
        assert_eq!(active_rules_for(&rules, &b3).count(), 0);

        Ok(())
    }

    #[test]
    fn missing_give_reports_index() {
        let activity = BundleActivity {
            id: ActivityId::from("broken"),
            name: None,
            rules: Some(vec![
                BundleRuleRecord::new(["b1"], 2, 1),
                BundleRuleRecord {
                    book_ids: Some(vec![BookId::from("b2")]),
                    by: Some(2),
                    give: None,
                },
            ]),
        };

        assert_eq!(
            activity.rules(),
            Err(ConfigError::MissingRuleField {
                index: 1,
                field: "give"
            })
        );
    }

    #[test]
    fn missing_rules_is_config_error() {
        let activity = BundleActivity {
            id: ActivityId::from("empty"),
            name: None,
            rules: None,
        };

        assert_eq!(activity.rules(), Err(ConfigError::MissingList("rules")));
    }
}
