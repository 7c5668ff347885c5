//! # Conversion Ports
//!
//! Store-side services the quoting flow depends on: unit conversion,
//! currency conversion and order measurement.

use crate::domain::entities::OrderItem;
use crate::domain::value_objects::{MeasureUnit, Money};
use crate::infrastructure::conversion::error::ConversionResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;

/// Converts store measurements into the carrier's base units.
#[async_trait]
pub trait MeasureConverter: Send + Sync + fmt::Debug {
    /// Converts a weight to kilograms.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::UnitUnavailable` if either `from` or the
    /// kilogram is not registered.
    async fn to_kilograms(&self, value: Decimal, from: &MeasureUnit) -> ConversionResult<Decimal>;

    /// Converts a length to meters.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::UnitUnavailable` if either `from` or the
    /// meter is not registered.
    async fn to_meters(&self, value: Decimal, from: &MeasureUnit) -> ConversionResult<Decimal>;
}

/// Converts carrier prices into the store's base currency.
#[async_trait]
pub trait CurrencyConverter: Send + Sync + fmt::Debug {
    /// Converts an amount into the base currency.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::CurrencyUnavailable` if the amount's
    /// currency is not registered.
    async fn to_base_currency(&self, amount: &Money) -> ConversionResult<Money>;
}

/// Measures an order in the store's own units.
pub trait ShipmentMeasurer: Send + Sync + fmt::Debug {
    /// Total weight of the items.
    fn total_weight(&self, items: &[OrderItem], exclude_free_shipping: bool) -> Decimal;

    /// Bounding box of the items as `(width, length, height)`.
    fn bounding_dimensions(&self, items: &[OrderItem]) -> (Decimal, Decimal, Decimal);
}
