//! # Fixture Carrier
//!
//! In-memory [`CarrierGateway`] answering from canned catalogs, service
//! details and rate quotes.
//!
//! Used by the tests and by the command line tool to run the quoting flow
//! without network access. Every call is counted and every rate request is
//! recorded so tests can assert on what the flow sent.
//!
//! Fixtures can be written in TOML:
//!
//! ```toml
//! [[catalogs.CA]]
//! code = "DOM.EP"
//! name = "Expedited Parcel"
//! detail_ref = "DOM.EP"
//!
//! [details."DOM.EP"]
//! code = "DOM.EP"
//! name = "Expedited Parcel"
//! restrictions = { max_weight_grams = "30000" }
//!
//! [[quotes."DOM.EP"]]
//! service_name = "Expedited Parcel"
//! rate = { amount = "18.99", currency = "CAD" }
//!
//! [quotes."DOM.RP"]
//! error = "service not available to destination"
//! ```

use crate::domain::entities::{QuoteResult, RateRequest, ServiceDescriptor, ServiceDetail};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CountryCode, ServiceCode};
use crate::infrastructure::carrier::error::{CarrierError, CarrierResult};
use crate::infrastructure::carrier::traits::{CarrierCredentials, CarrierGateway};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

/// A canned answer: the value, or the message of a carrier rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FixtureEntry<T> {
    /// The carrier rejects the call with this message.
    Failure {
        /// Rejection message.
        error: String,
    },
    /// The carrier answers with this value.
    Success(T),
}

impl<T> FixtureEntry<T> {
    fn into_result(self) -> CarrierResult<T> {
        match self {
            Self::Failure { error } => Err(CarrierError::rejected(error)),
            Self::Success(value) => Ok(value),
        }
    }
}

/// Serialized form of a [`FixtureCarrier`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarrierFixture {
    /// Catalogs keyed by destination country code.
    #[serde(default)]
    pub catalogs: HashMap<String, FixtureEntry<Vec<ServiceDescriptor>>>,
    /// Service details keyed by detail reference.
    #[serde(default)]
    pub details: HashMap<String, FixtureEntry<ServiceDetail>>,
    /// Rate quotes keyed by service code.
    #[serde(default)]
    pub quotes: HashMap<String, FixtureEntry<Vec<QuoteResult>>>,
}

/// Errors loading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The file could not be read.
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),
    /// TOML syntax or shape error.
    #[error("invalid TOML fixture: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON syntax or shape error.
    #[error("invalid JSON fixture: {0}")]
    Json(#[from] serde_json::Error),
    /// A key is not a valid code.
    #[error("invalid fixture entry: {0}")]
    Invalid(#[from] DomainError),
}

/// Number of calls received per endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Catalog lookups.
    pub catalog: usize,
    /// Service detail lookups.
    pub detail: usize,
    /// Rate quote requests.
    pub quote: usize,
}

/// Carrier gateway backed by in-memory fixtures.
#[derive(Debug, Default)]
pub struct FixtureCarrier {
    catalogs: HashMap<CountryCode, CarrierResult<Vec<ServiceDescriptor>>>,
    details: HashMap<String, CarrierResult<ServiceDetail>>,
    quotes: HashMap<ServiceCode, CarrierResult<Vec<QuoteResult>>>,
    catalog_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    quote_calls: AtomicUsize,
    rate_requests: RwLock<Vec<RateRequest>>,
}

impl FixtureCarrier {
    /// Creates a carrier with no services anywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a carrier from a deserialized fixture.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCode` if a catalog key is not a country
    /// code.
    pub fn from_fixture(fixture: CarrierFixture) -> Result<Self, DomainError> {
        let mut carrier = Self::new();
        for (country, entry) in fixture.catalogs {
            carrier
                .catalogs
                .insert(CountryCode::parse(&country)?, entry.into_result());
        }
        for (detail_ref, entry) in fixture.details {
            carrier.details.insert(detail_ref, entry.into_result());
        }
        for (code, entry) in fixture.quotes {
            carrier
                .quotes
                .insert(ServiceCode::new(code), entry.into_result());
        }
        Ok(carrier)
    }

    /// Parses a TOML fixture.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Toml` on malformed input and
    /// `FixtureError::Invalid` on a bad country key.
    pub fn from_toml_str(input: &str) -> Result<Self, FixtureError> {
        let fixture: CarrierFixture = toml::from_str(input)?;
        Ok(Self::from_fixture(fixture)?)
    }

    /// Parses a JSON fixture.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Json` on malformed input and
    /// `FixtureError::Invalid` on a bad country key.
    pub fn from_json_str(input: &str) -> Result<Self, FixtureError> {
        let fixture: CarrierFixture = serde_json::from_str(input)?;
        Ok(Self::from_fixture(fixture)?)
    }

    /// Loads a fixture file; `.json` files are parsed as JSON, anything else
    /// as TOML.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Io` if the file cannot be read, otherwise as
    /// the parsers.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let input = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&input),
            _ => Self::from_toml_str(&input),
        }
    }

    /// Sets the catalog for a destination country.
    #[must_use]
    pub fn with_catalog(mut self, country: CountryCode, services: Vec<ServiceDescriptor>) -> Self {
        self.catalogs.insert(country, Ok(services));
        self
    }

    /// Makes catalog lookups for a country fail.
    #[must_use]
    pub fn with_catalog_error(mut self, country: CountryCode, error: CarrierError) -> Self {
        self.catalogs.insert(country, Err(error));
        self
    }

    /// Sets the detail returned for a reference.
    #[must_use]
    pub fn with_detail(mut self, detail_ref: impl Into<String>, detail: ServiceDetail) -> Self {
        self.details.insert(detail_ref.into(), Ok(detail));
        self
    }

    /// Makes detail lookups for a reference fail.
    #[must_use]
    pub fn with_detail_error(mut self, detail_ref: impl Into<String>, error: CarrierError) -> Self {
        self.details.insert(detail_ref.into(), Err(error));
        self
    }

    /// Sets the quotes returned for a service.
    #[must_use]
    pub fn with_quotes(mut self, service: ServiceCode, quotes: Vec<QuoteResult>) -> Self {
        self.quotes.insert(service, Ok(quotes));
        self
    }

    /// Makes rate requests for a service fail.
    #[must_use]
    pub fn with_quote_error(mut self, service: ServiceCode, error: CarrierError) -> Self {
        self.quotes.insert(service, Err(error));
        self
    }

    /// Returns the calls received so far.
    #[must_use]
    pub fn call_counts(&self) -> CallCounts {
        CallCounts {
            catalog: self.catalog_calls.load(Ordering::SeqCst),
            detail: self.detail_calls.load(Ordering::SeqCst),
            quote: self.quote_calls.load(Ordering::SeqCst),
        }
    }

    /// Returns the rate requests received so far, in arrival order.
    pub async fn rate_requests(&self) -> Vec<RateRequest> {
        self.rate_requests.read().await.clone()
    }
}

#[async_trait]
impl CarrierGateway for FixtureCarrier {
    async fn fetch_service_catalog(
        &self,
        country: &CountryCode,
        _credentials: &CarrierCredentials,
        _use_sandbox: bool,
    ) -> CarrierResult<Vec<ServiceDescriptor>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.catalogs
            .get(country)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_service_detail(
        &self,
        _credentials: &CarrierCredentials,
        detail_ref: &str,
    ) -> CarrierResult<ServiceDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(detail_ref)
            .cloned()
            .unwrap_or_else(|| Err(CarrierError::service_not_found(detail_ref)))
    }

    async fn fetch_rate_quotes(
        &self,
        request: &RateRequest,
        _credentials: &CarrierCredentials,
        _use_sandbox: bool,
    ) -> CarrierResult<Vec<QuoteResult>> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        self.rate_requests.write().await.push(request.clone());
        self.quotes
            .get(&request.service_code)
            .cloned()
            .unwrap_or_else(|| {
                Err(CarrierError::rejected(format!(
                    "no rates for service {}",
                    request.service_code
                )))
            })
    }
}
