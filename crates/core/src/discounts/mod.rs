//! Discount utilities
//!
//! Checked decimal arithmetic shared by the activity strategies. Every
//! operation that could leave the `Decimal` range reports
//! [`DiscountError::Overflow`] instead of panicking.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscountError {
    /// An intermediate amount did not fit in a `Decimal`.
    #[error("discount arithmetic overflowed")]
    Overflow,
}

/// Multiply a unit price by a quantity.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the product is out of range.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Result<Decimal, DiscountError> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(DiscountError::Overflow)
}

/// Add two amounts.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the sum is out of range.
pub fn add(lhs: Decimal, rhs: Decimal) -> Result<Decimal, DiscountError> {
    lhs.checked_add(rhs).ok_or(DiscountError::Overflow)
}

/// Subtract `rhs` from `lhs`.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the difference is out of range.
pub fn sub(lhs: Decimal, rhs: Decimal) -> Result<Decimal, DiscountError> {
    lhs.checked_sub(rhs).ok_or(DiscountError::Overflow)
}

/// Scale `amount` by `factor` and round down to a whole amount.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the product is out of range.
pub fn floor_scaled(amount: Decimal, factor: Decimal) -> Result<Decimal, DiscountError> {
    amount
        .checked_mul(factor)
        .map(|scaled| scaled.floor())
        .ok_or(DiscountError::Overflow)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn line_total_multiplies_by_quantity() -> TestResult {
        assert_eq!(line_total(dec!(12.5), 4)?, dec!(50));
        assert_eq!(line_total(dec!(12.5), 0)?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn line_total_overflow_returns_error() {
        assert_eq!(line_total(Decimal::MAX, 2), Err(DiscountError::Overflow));
    }

    #[test]
    fn floor_scaled_rounds_towards_negative_infinity() -> TestResult {
        assert_eq!(floor_scaled(dec!(250), dec!(0.8))?, dec!(200));
        assert_eq!(floor_scaled(dec!(99), dec!(0.95))?, dec!(94));
        assert_eq!(floor_scaled(dec!(-5), dec!(0.5))?, dec!(-3));

        Ok(())
    }

    #[test]
    fn add_and_sub_overflow_return_error() {
        assert_eq!(add(Decimal::MAX, Decimal::ONE), Err(DiscountError::Overflow));
        assert_eq!(sub(Decimal::MIN, Decimal::ONE), Err(DiscountError::Overflow));
    }
}
