//! # Quote Result
//!
//! A price estimate returned by the carrier for one parcel via one service.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::entities::QuoteResult;
//! use parcel_quote::domain::value_objects::{CurrencyCode, Money};
//! use rust_decimal::Decimal;
//!
//! let quote = QuoteResult::new(
//!     "Expedited Parcel",
//!     Money::new(Decimal::new(1899, 2), CurrencyCode::cad()),
//! )
//! .with_delivery_estimate("Expected delivery in 2 business days");
//!
//! assert_eq!(quote.delivery_estimate(), Some("Expected delivery in 2 business days"));
//! ```

use crate::domain::value_objects::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A carrier price quote for one parcel.
///
/// Only the rate is ever transformed (currency conversion); the name and
/// estimate are carried into the response unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Service name as the carrier reports it.
    service_name: String,
    /// Price per parcel in the carrier's currency.
    rate: Money,
    /// Human readable delivery-time estimate.
    #[serde(default)]
    delivery_estimate: Option<String>,
}

impl QuoteResult {
    /// Creates a quote without a delivery estimate.
    #[must_use]
    pub fn new(service_name: impl Into<String>, rate: Money) -> Self {
        Self {
            service_name: service_name.into(),
            rate,
            delivery_estimate: None,
        }
    }

    /// Sets the delivery-time estimate.
    #[must_use]
    pub fn with_delivery_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.delivery_estimate = Some(estimate.into());
        self
    }

    /// Returns the service name.
    #[inline]
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the per-parcel rate.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> &Money {
        &self.rate
    }

    /// Returns the delivery-time estimate, if any.
    #[inline]
    #[must_use]
    pub fn delivery_estimate(&self) -> Option<&str> {
        self.delivery_estimate.as_deref()
    }
}

impl fmt::Display for QuoteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quote({} @ {})", self.service_name, self.rate)
    }
}
