//! # Checked Arithmetic
//!
//! Overflow-checked decimal math for measurements and parcel counts.
//!
//! - [`ArithmeticError`]: why a computation failed
//! - [`CheckedArithmetic`]: checked add, multiply and divide on `Decimal`
//! - [`ceil_count`]: parts needed to stay under a bound
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::value_objects::arithmetic::{CheckedArithmetic, ceil_count};
//! use rust_decimal::Decimal;
//!
//! let girth = Decimal::new(340, 0);
//! let max_girth = Decimal::new(200, 0);
//! assert_eq!(ceil_count(girth, max_girth).unwrap(), 2);
//!
//! let half = Decimal::new(25, 0).safe_div(Decimal::new(2, 0)).unwrap();
//! assert_eq!(half, Decimal::new(125, 1));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Failure of a checked computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// The result does not fit the target type.
    #[error("arithmetic overflow")]
    Overflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// A bound that must be positive was not.
    #[error("non-positive bound: {0}")]
    NonPositiveBound(Decimal),
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Number of equal parts needed so that `value / parts <= bound`.
///
/// Always at least one; a zero or negative value needs a single part.
///
/// # Errors
///
/// Returns `ArithmeticError::NonPositiveBound` if `bound` is zero or
/// negative and `ArithmeticError::Overflow` if the count exceeds `u32::MAX`.
pub fn ceil_count(value: Decimal, bound: Decimal) -> ArithmeticResult<u32> {
    if bound <= Decimal::ZERO {
        return Err(ArithmeticError::NonPositiveBound(bound));
    }
    if value <= Decimal::ZERO {
        return Ok(1);
    }
    let parts = value
        .safe_div(bound)?
        .ceil()
        .to_u32()
        .ok_or(ArithmeticError::Overflow)?;
    Ok(parts.max(1))
}

/// Checked operations that never panic.
pub trait CheckedArithmetic: Sized {
    /// Adds `rhs`.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Multiplies by `rhs`.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Divides by `rhs`.
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    #[test]
    fn fractional_ratio_rounds_up() {
        assert_eq!(ceil_count(d(25_000), d(20_000)).unwrap(), 2);
        assert_eq!(ceil_count(Decimal::new(2_001, 2), d(20)).unwrap(), 2);
    }

    #[test]
    fn exact_multiple_is_not_rounded() {
        assert_eq!(ceil_count(d(90), d(30)).unwrap(), 3);
        assert_eq!(ceil_count(d(340), d(170)).unwrap(), 2);
    }

    #[test]
    fn small_or_empty_values_need_one_part() {
        assert_eq!(ceil_count(d(5), d(30)).unwrap(), 1);
        assert_eq!(ceil_count(Decimal::ZERO, d(30)).unwrap(), 1);
    }

    #[test]
    fn non_positive_bound_is_rejected() {
        assert_eq!(
            ceil_count(Decimal::ONE, Decimal::ZERO),
            Err(ArithmeticError::NonPositiveBound(Decimal::ZERO))
        );
        assert!(ceil_count(Decimal::ONE, d(-3)).is_err());
    }

    #[test]
    fn huge_ratio_overflows_u32() {
        let value = Decimal::new(i64::MAX, 0);
        let bound = Decimal::new(1, 3);
        assert_eq!(ceil_count(value, bound), Err(ArithmeticError::Overflow));
    }

    #[test]
    fn checked_ops() {
        assert_eq!(d(60).safe_add(d(50)).unwrap(), d(110));
        assert_eq!(d(25).safe_mul(d(1000)).unwrap(), d(25_000));
        assert_eq!(Decimal::MAX.safe_add(Decimal::ONE), Err(ArithmeticError::Overflow));
        assert_eq!(Decimal::MAX.safe_mul(d(2)), Err(ArithmeticError::Overflow));
        assert_eq!(d(100).safe_div(Decimal::ZERO), Err(ArithmeticError::DivisionByZero));
    }
}
