//! # Rate Response
//!
//! What the caller gets back: shipping options, plus response-level errors
//! when no option could be produced.

use crate::domain::value_objects::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One selectable shipping method with its total price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    /// Service name shown to the customer.
    pub name: String,
    /// Total rate for all parcels, in the store's base currency.
    pub rate: Money,
    /// Delivery estimate, annotated with the parcel count when split.
    pub description: Option<String>,
}

impl fmt::Display for ShippingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.rate)
    }
}

/// Result of a rate computation.
///
/// A response with no options and at least one error is a total failure.
/// Partial failures are not surfaced here; they are logged.
///
/// # Examples
///
/// ```
/// use parcel_quote::domain::entities::RateResponse;
///
/// let response = RateResponse::failure("no shipment items");
/// assert!(response.is_failure());
/// assert_eq!(response.errors(), ["no shipment items"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateResponse {
    options: Vec<ShippingOption>,
    errors: Vec<String>,
}

impl RateResponse {
    /// Creates an empty response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a response carrying a single error and no options.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        let mut response = Self::new();
        response.add_error(error);
        response
    }

    /// Appends a shipping option.
    pub fn add_option(&mut self, option: ShippingOption) {
        self.options.push(option);
    }

    /// Appends a response-level error.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// Shipping options in catalog order.
    #[must_use]
    pub fn options(&self) -> &[ShippingOption] {
        &self.options
    }

    /// Response-level errors.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns true if no option was produced and an error was recorded.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.options.is_empty() && !self.errors.is_empty()
    }

    /// Returns the cheapest option, if any.
    #[must_use]
    pub fn cheapest(&self) -> Option<&ShippingOption> {
        self.options.iter().min_by_key(|o| o.rate.amount())
    }
}
