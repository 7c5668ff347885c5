//! # Rate Request
//!
//! The outbound request for one service's price on one planned parcel.
//!
//! The carrier accepts three destination shapes: a postal code for domestic
//! shipments, a ZIP code for the cross-border neighbour, and a bare country
//! code for everything else. [`Destination`] is matched exhaustively when the
//! transport serializes the request.

use crate::domain::value_objects::enums::QuoteKind;
use crate::domain::value_objects::{CountryCode, Dimensions, ServiceCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination of a rate request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    /// Domestic shipment, normalized postal code only.
    Domestic {
        /// Postal code without spaces, uppercase.
        postal_code: String,
    },
    /// Cross-border shipment, ZIP code as entered.
    CrossBorder {
        /// ZIP code, verbatim.
        zip_code: String,
    },
    /// Any other country, country code only.
    International {
        /// Destination country.
        country: CountryCode,
    },
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domestic { postal_code } => write!(f, "domestic:{postal_code}"),
            Self::CrossBorder { zip_code } => write!(f, "cross-border:{zip_code}"),
            Self::International { country } => write!(f, "international:{country}"),
        }
    }
}

/// Pricing mode and the account data it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteType {
    /// Public counter rates.
    Counter,
    /// Contract rates for a merchant account.
    Commercial {
        /// Merchant customer number.
        customer_number: String,
        /// Contract identifier, when the merchant has one.
        contract_id: Option<String>,
    },
}

impl QuoteType {
    /// Returns the pricing mode without account data.
    #[must_use]
    pub fn kind(&self) -> QuoteKind {
        match self {
            Self::Counter => QuoteKind::Counter,
            Self::Commercial { .. } => QuoteKind::Commercial,
        }
    }
}

/// One rate request: one service, one planned parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRequest {
    /// Normalized origin postal code.
    pub origin_postal_code: String,
    /// Destination variant.
    pub destination: Destination,
    /// The single service being quoted.
    pub service_code: ServiceCode,
    /// Weight of one parcel in kilograms.
    pub weight_kg: Decimal,
    /// Length of one parcel in centimeters.
    pub length_cm: Decimal,
    /// Width of one parcel in centimeters.
    pub width_cm: Decimal,
    /// Height of one parcel in centimeters.
    pub height_cm: Decimal,
    /// Pricing mode.
    pub quote_type: QuoteType,
}

impl RateRequest {
    /// Per-parcel dimensions as a canonical triple.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::canonical(self.length_cm, self.width_cm, self.height_cm)
    }
}
