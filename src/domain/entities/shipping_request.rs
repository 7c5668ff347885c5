//! # Shipping Request
//!
//! The caller's request for rates: where from, where to, and what ships.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::domain::entities::{OrderItem, ShippingAddress, ShippingRequest};
//! use parcel_quote::domain::value_objects::{CountryCode, PostalCode};
//! use rust_decimal::Decimal;
//!
//! let request = ShippingRequest::new(
//!     PostalCode::new("K1A 0B1"),
//!     Some(ShippingAddress::new(
//!         CountryCode::parse("CA").unwrap(),
//!         PostalCode::new("h2x 1y4"),
//!     )),
//! )
//! .with_item(OrderItem::new(Decimal::new(2, 0), 1));
//!
//! assert!(request.validate().is_ok());
//! ```

use crate::domain::value_objects::{CountryCode, PostalCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One order line as the store measures it.
///
/// Weight and sides are per unit, in the store's configured units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Weight of one unit.
    pub weight: Decimal,
    /// Length of one unit.
    #[serde(default)]
    pub length: Decimal,
    /// Width of one unit.
    #[serde(default)]
    pub width: Decimal,
    /// Height of one unit.
    #[serde(default)]
    pub height: Decimal,
    /// Number of units.
    pub quantity: u32,
    /// Item ships for free and is left out of the rated weight.
    #[serde(default)]
    pub free_shipping: bool,
}

impl OrderItem {
    /// Creates an item with the given unit weight and quantity and no size.
    #[must_use]
    pub fn new(weight: Decimal, quantity: u32) -> Self {
        Self {
            weight,
            length: Decimal::ZERO,
            width: Decimal::ZERO,
            height: Decimal::ZERO,
            quantity,
            free_shipping: false,
        }
    }

    /// Sets the unit sides.
    #[must_use]
    pub fn with_size(mut self, length: Decimal, width: Decimal, height: Decimal) -> Self {
        self.length = length;
        self.width = width;
        self.height = height;
        self
    }

    /// Marks the item as shipping for free.
    #[must_use]
    pub fn with_free_shipping(mut self) -> Self {
        self.free_shipping = true;
        self
    }
}

/// Destination of the shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Destination country, if the customer picked one.
    pub country: Option<CountryCode>,
    /// Destination postal or ZIP code.
    #[serde(default)]
    pub postal_code: Option<PostalCode>,
}

impl ShippingAddress {
    /// Creates an address with a country and postal code.
    #[must_use]
    pub fn new(country: CountryCode, postal_code: PostalCode) -> Self {
        Self {
            country: Some(country),
            postal_code: Some(postal_code),
        }
    }
}

/// Why a shipping request cannot be quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    /// The order has no items.
    #[error("no shipment items")]
    NoItems,
    /// No destination address.
    #[error("shipping address is not set")]
    NoAddress,
    /// The destination address has no country.
    #[error("shipping country is not set")]
    NoCountry,
    /// The store has no origin postal code.
    #[error("origin postal code is not set")]
    NoOriginPostalCode,
}

/// A request for shipping rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRequest {
    /// Postal code the parcels ship from.
    pub origin_postal_code: PostalCode,
    /// Where the parcels go.
    pub destination: Option<ShippingAddress>,
    /// Ordered order lines.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl ShippingRequest {
    /// Creates a request with no items.
    #[must_use]
    pub fn new(origin_postal_code: PostalCode, destination: Option<ShippingAddress>) -> Self {
        Self {
            origin_postal_code,
            destination,
            items: Vec::new(),
        }
    }

    /// Appends an order line.
    #[must_use]
    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Checks that the request carries everything a quote needs.
    ///
    /// Checks run in a fixed order: items, address, country, origin.
    ///
    /// # Errors
    ///
    /// Returns the first [`RequestValidationError`] found.
    pub fn validate(&self) -> Result<ValidatedRequest<'_>, RequestValidationError> {
        if self.items.is_empty() {
            return Err(RequestValidationError::NoItems);
        }
        let address = self
            .destination
            .as_ref()
            .ok_or(RequestValidationError::NoAddress)?;
        let country = address
            .country
            .as_ref()
            .ok_or(RequestValidationError::NoCountry)?;
        if self.origin_postal_code.is_blank() {
            return Err(RequestValidationError::NoOriginPostalCode);
        }

        Ok(ValidatedRequest {
            origin_postal_code: &self.origin_postal_code,
            country,
            postal_code: address.postal_code.as_ref(),
            items: &self.items,
        })
    }
}

/// Borrowed view of a request that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    /// Origin postal code, not blank.
    pub origin_postal_code: &'a PostalCode,
    /// Destination country.
    pub country: &'a CountryCode,
    /// Destination postal or ZIP code, if given.
    pub postal_code: Option<&'a PostalCode>,
    /// Order lines, not empty.
    pub items: &'a [OrderItem],
}
