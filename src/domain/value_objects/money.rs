//! # Money
//!
//! Decimal amount tagged with its currency.

use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use crate::domain::value_objects::codes::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of money in a specific currency.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::value_objects::{CurrencyCode, Money};
/// use rust_decimal::Decimal;
///
/// let rate = Money::new(Decimal::new(1250, 2), CurrencyCode::cad());
/// assert_eq!(rate.to_string(), "12.50 CAD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
}

impl Money {
    /// Creates an amount in the given currency.
    #[must_use]
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Returns the amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Multiplies the amount by a whole factor, keeping the currency.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the product overflows.
    pub fn times(&self, factor: u32) -> ArithmeticResult<Self> {
        let amount = self.amount.safe_mul(Decimal::from(factor))?;
        Ok(Self::new(amount, self.currency.clone()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
