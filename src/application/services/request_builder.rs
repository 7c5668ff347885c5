//! # Quote Request Builder
//!
//! Builds the [`RateRequest`] for one service and one planned parcel.
//!
//! The destination shape depends on the country: the domestic country
//! sends a normalized postal code (whitespace removed, uppercase), the
//! cross-border country sends its ZIP code verbatim, every other country
//! sends only its code. Commercial rates are requested when the merchant
//! has a customer number; the contract id rides along only then.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::application::services::{AccountContext, QuoteRequestBuilder};
//! use parcel_quote::domain::entities::{Destination, QuoteType};
//! use parcel_quote::domain::value_objects::{CountryCode, PostalCode};
//!
//! let builder = QuoteRequestBuilder::new(CountryCode::canada(), CountryCode::united_states());
//! let destination = builder.destination(&CountryCode::canada(), Some(&PostalCode::new("k1a 0b1")));
//! assert_eq!(destination, Destination::Domestic { postal_code: "K1A0B1".to_string() });
//!
//! let account = AccountContext::new(Some("  ".to_string()), Some("42".to_string()));
//! assert_eq!(account.quote_type(), QuoteType::Counter);
//! ```

use crate::domain::entities::{Destination, ParcelPlan, QuoteType, RateRequest, ServiceDescriptor};
use crate::domain::value_objects::{CountryCode, PostalCode};
use crate::infrastructure::config::CarrierSettings;

/// The merchant's account data that selects the pricing mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountContext {
    customer_number: Option<String>,
    contract_id: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AccountContext {
    /// Creates an account context; blank values count as absent.
    #[must_use]
    pub fn new(customer_number: Option<String>, contract_id: Option<String>) -> Self {
        Self {
            customer_number: non_blank(customer_number),
            contract_id: non_blank(contract_id),
        }
    }

    /// An account without a customer number.
    #[must_use]
    pub fn counter() -> Self {
        Self::default()
    }

    /// Takes the account data from the carrier settings.
    #[must_use]
    pub fn from_settings(settings: &CarrierSettings) -> Self {
        Self::new(settings.customer_number.clone(), settings.contract_id.clone())
    }

    /// Commercial with the customer number, counter otherwise.
    #[must_use]
    pub fn quote_type(&self) -> QuoteType {
        match &self.customer_number {
            Some(customer_number) => QuoteType::Commercial {
                customer_number: customer_number.clone(),
                contract_id: self.contract_id.clone(),
            },
            None => QuoteType::Counter,
        }
    }
}

/// Builds rate requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequestBuilder {
    domestic_country: CountryCode,
    cross_border_country: CountryCode,
}

impl QuoteRequestBuilder {
    /// Creates a builder for the given domestic and cross-border countries.
    #[must_use]
    pub fn new(domestic_country: CountryCode, cross_border_country: CountryCode) -> Self {
        Self {
            domestic_country,
            cross_border_country,
        }
    }

    /// Takes the countries from the carrier settings.
    #[must_use]
    pub fn from_settings(settings: &CarrierSettings) -> Self {
        Self::new(
            settings.domestic_country.clone(),
            settings.cross_border_country.clone(),
        )
    }

    /// Picks the destination shape for a country.
    ///
    /// A missing postal code is sent as an empty string; the carrier
    /// reports it as a per-service error.
    #[must_use]
    pub fn destination(&self, country: &CountryCode, postal_code: Option<&PostalCode>) -> Destination {
        if *country == self.domestic_country {
            Destination::Domestic {
                postal_code: postal_code.map(PostalCode::normalized).unwrap_or_default(),
            }
        } else if *country == self.cross_border_country {
            Destination::CrossBorder {
                zip_code: postal_code
                    .map(|code| code.verbatim().to_string())
                    .unwrap_or_default(),
            }
        } else {
            Destination::International {
                country: country.clone(),
            }
        }
    }

    /// Builds the request for one service and one planned parcel.
    #[must_use]
    pub fn build(
        &self,
        origin_postal_code: &PostalCode,
        country: &CountryCode,
        postal_code: Option<&PostalCode>,
        plan: &ParcelPlan,
        service: &ServiceDescriptor,
        account: &AccountContext,
    ) -> RateRequest {
        let dims = plan.dimensions();
        RateRequest {
            origin_postal_code: origin_postal_code.normalized(),
            destination: self.destination(country, postal_code),
            service_code: service.code.clone(),
            weight_kg: plan.weight_kg(),
            length_cm: dims.length(),
            width_cm: dims.width(),
            height_cm: dims.height(),
            quote_type: account.quote_type(),
        }
    }
}
