//! # Carrier Gateway Trait
//!
//! Port definition for the carrier's web services.
//!
//! The quoting flow needs three endpoints: the service catalog for a
//! destination country, the detail record of one service (its physical
//! restrictions) and the rate quotes for one parcel. Transport, XML
//! handling and sandbox routing stay behind [`CarrierGateway`].

use crate::domain::entities::{QuoteResult, RateRequest, ServiceDescriptor, ServiceDetail};
use crate::domain::value_objects::CountryCode;
use crate::infrastructure::carrier::error::CarrierResult;
use async_trait::async_trait;
use std::fmt;

/// API credentials sent with every carrier call.
///
/// The key never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct CarrierCredentials {
    api_key: String,
}

impl CarrierCredentials {
    /// Wraps an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for CarrierCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Access to the carrier's catalog, detail and rating endpoints.
///
/// Implementations map transport and carrier faults to
/// [`CarrierError`](crate::infrastructure::carrier::error::CarrierError)
/// variants; retries and timeouts are applied by the caller.
#[async_trait]
pub trait CarrierGateway: Send + Sync + fmt::Debug {
    /// Lists the services the carrier offers towards a destination country.
    ///
    /// # Errors
    ///
    /// - `CarrierError::Authentication` - Credentials refused
    /// - `CarrierError::Timeout` / `Connection` - Transport failure
    async fn fetch_service_catalog(
        &self,
        country: &CountryCode,
        credentials: &CarrierCredentials,
        use_sandbox: bool,
    ) -> CarrierResult<Vec<ServiceDescriptor>>;

    /// Fetches the detail record of one catalog entry.
    ///
    /// # Errors
    ///
    /// - `CarrierError::ServiceNotFound` - Unknown detail reference
    /// - `CarrierError::Timeout` / `Connection` - Transport failure
    async fn fetch_service_detail(
        &self,
        credentials: &CarrierCredentials,
        detail_ref: &str,
    ) -> CarrierResult<ServiceDetail>;

    /// Prices one planned parcel for the single service named in `request`.
    ///
    /// # Errors
    ///
    /// - `CarrierError::Rejected` - The carrier declined to price the parcel
    /// - `CarrierError::Timeout` / `Connection` - Transport failure
    async fn fetch_rate_quotes(
        &self,
        request: &RateRequest,
        credentials: &CarrierCredentials,
        use_sandbox: bool,
    ) -> CarrierResult<Vec<QuoteResult>>;
}
