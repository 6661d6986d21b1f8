//! # Checked Arithmetic
//!
//! Safe decimal arithmetic for prices, weights and volumes.
//!
//! All money and measurement math in the crate goes through
//! [`CheckedArithmetic`] so that overflow surfaces as an error instead of a
//! panic.
//!
//! # Examples
//!
//! ```
//! use delivery_gateway::domain::value_objects::arithmetic::{CheckedArithmetic, fraction_of};
//! use rust_decimal::Decimal;
//!
//! let fee = fraction_of(Decimal::from(10_000), Decimal::new(1, 2)).unwrap();
//! assert_eq!(fee, Decimal::from(100));
//! assert!(Decimal::ONE.safe_div(Decimal::ZERO).is_err());
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Number of decimal places kept for money amounts.
pub const MONEY_SCALE: u32 = 2;

/// Trait for checked arithmetic operations.
///
/// Implementors must never panic: overflow, underflow and division by zero
/// are reported through [`ArithmeticError`].
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Sums an iterator of decimals with overflow checking.
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if any partial sum overflows.
pub fn checked_sum<I>(values: I) -> ArithmeticResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, CheckedArithmetic::safe_add)
}

/// Returns `amount * rate`, where `rate` is a fraction (0.01 = 1 %).
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if the product overflows.
#[inline]
pub fn fraction_of(amount: Decimal, rate: Decimal) -> ArithmeticResult<Decimal> {
    amount.safe_mul(rate)
}

/// Rounds a money amount to [`MONEY_SCALE`] places, half away from zero.
#[inline]
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps `value` into the optional `[min, max]` bounds.
///
/// A missing bound does not constrain. When both are present and
/// `min > max`, the minimum wins.
#[must_use]
pub fn clamp_optional(value: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> Decimal {
    let capped = match max {
        Some(max) if value > max => max,
        _ => value,
    };
    match min {
        Some(min) if capped < min => min,
        _ => capped,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_correctly() {
        assert_eq!(ArithmeticError::Overflow.to_string(), "arithmetic overflow");
        assert_eq!(
            ArithmeticError::DivisionByZero.to_string(),
            "division by zero"
        );
    }

    #[test]
    fn safe_ops_on_decimal() {
        let a = Decimal::new(100, 0);
        let b = Decimal::new(50, 0);
        assert_eq!(a.safe_add(b).unwrap(), Decimal::new(150, 0));
        assert_eq!(a.safe_sub(b).unwrap(), Decimal::new(50, 0));
        assert_eq!(a.safe_mul(b).unwrap(), Decimal::new(5000, 0));
        assert_eq!(a.safe_div(b).unwrap(), Decimal::new(2, 0));
    }

    #[test]
    fn safe_div_by_zero_fails() {
        assert_eq!(
            Decimal::ONE.safe_div(Decimal::ZERO),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn safe_mul_overflow_fails() {
        assert_eq!(
            Decimal::MAX.safe_mul(Decimal::TWO),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn checked_sum_adds_all() {
        let total = checked_sum([Decimal::ONE, Decimal::TWO, Decimal::new(5, 1)]).unwrap();
        assert_eq!(total, Decimal::new(35, 1));
        assert_eq!(checked_sum([]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn checked_sum_overflow_fails() {
        assert_eq!(
            checked_sum([Decimal::MAX, Decimal::ONE]),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn fraction_of_percent() {
        let two_percent = Decimal::new(2, 2);
        assert_eq!(
            fraction_of(Decimal::from(1000), two_percent).unwrap(),
            Decimal::from(20)
        );
    }

    #[test]
    fn round_money_half_away_from_zero() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_money(Decimal::new(12344, 3)), Decimal::new(1234, 2));
    }

    #[test]
    fn clamp_optional_bounds() {
        let v = Decimal::from(300);
        assert_eq!(clamp_optional(v, None, None), v);
        assert_eq!(
            clamp_optional(v, Some(Decimal::from(400)), None),
            Decimal::from(400)
        );
        assert_eq!(
            clamp_optional(v, None, Some(Decimal::from(250))),
            Decimal::from(250)
        );
        assert_eq!(
            clamp_optional(v, Some(Decimal::from(100)), Some(Decimal::from(500))),
            v
        );
    }
}
