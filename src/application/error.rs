//! # Application Errors
//!
//! Failures of a quoting run.
//!
//! # Error Hierarchy
//!
//! ```text
//! QuoteError
//! ├── InputValidation          - request incomplete (fatal)
//! ├── InvalidParcel            - negative measurements (fatal)
//! ├── Conversion               - unit or currency conversion failed (fatal)
//! ├── CatalogUnavailable       - service catalog lookup failed (fatal)
//! ├── ServiceDetailUnavailable - one service's limits unknown (skips the service)
//! ├── PlanningFailed           - one service's parcel plan overflowed (skips the service)
//! └── QuoteUnavailable         - one service could not be priced (skips the service)
//! ```
//!
//! Fatal errors turn into a response carrying that single error. The
//! others are collected, logged, and only surface when no option at all
//! could be produced.
//!
//! # Examples
//!
//! ```
//! use parcel_quote::application::error::QuoteError;
//! use parcel_quote::domain::entities::RequestValidationError;
//! use parcel_quote::infrastructure::carrier::CarrierError;
//!
//! let err = QuoteError::from(RequestValidationError::NoItems);
//! assert!(err.is_fatal());
//! assert_eq!(err.to_string(), "no shipment items");
//!
//! let err = QuoteError::quote_unavailable("DOM.EP", CarrierError::timeout("slow"));
//! assert!(!err.is_fatal());
//! assert!(err.is_retryable());
//! ```

use crate::domain::entities::RequestValidationError;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::ServiceCode;
use crate::infrastructure::carrier::CarrierError;
use crate::infrastructure::conversion::ConversionError;
use thiserror::Error;

/// Error of a quoting run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The request lacks items, an address, a country or an origin.
    #[error("{0}")]
    InputValidation(#[from] RequestValidationError),

    /// The normalized parcel is not physically valid.
    #[error("invalid parcel: {0}")]
    InvalidParcel(DomainError),

    /// A store conversion failed.
    #[error("{0}")]
    Conversion(#[from] ConversionError),

    /// The carrier's service catalog could not be fetched.
    #[error("service catalog unavailable: {0}")]
    CatalogUnavailable(CarrierError),

    /// A service's detail record could not be fetched.
    #[error("{service}: service detail unavailable: {source}")]
    ServiceDetailUnavailable {
        /// The service being quoted.
        service: ServiceCode,
        /// The carrier failure.
        source: CarrierError,
    },

    /// A service's parcels could not be planned.
    #[error("{service}: parcel planning failed: {source}")]
    PlanningFailed {
        /// The service being quoted.
        service: ServiceCode,
        /// The planning failure.
        source: DomainError,
    },

    /// The carrier did not price a service.
    #[error("{service}: {source}")]
    QuoteUnavailable {
        /// The service being quoted.
        service: ServiceCode,
        /// The carrier failure.
        source: CarrierError,
    },
}

impl QuoteError {
    /// Creates a service detail error.
    #[must_use]
    pub fn detail_unavailable(service: impl Into<ServiceCode>, source: CarrierError) -> Self {
        Self::ServiceDetailUnavailable {
            service: service.into(),
            source,
        }
    }

    /// Creates a planning error.
    #[must_use]
    pub fn planning_failed(service: impl Into<ServiceCode>, source: DomainError) -> Self {
        Self::PlanningFailed {
            service: service.into(),
            source,
        }
    }

    /// Creates a quote error.
    #[must_use]
    pub fn quote_unavailable(service: impl Into<ServiceCode>, source: CarrierError) -> Self {
        Self::QuoteUnavailable {
            service: service.into(),
            source,
        }
    }

    /// Returns true if the whole run must stop.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::ServiceDetailUnavailable { .. }
                | Self::PlanningFailed { .. }
                | Self::QuoteUnavailable { .. }
        )
    }

    /// Returns true if the underlying carrier failure was transient.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::CatalogUnavailable(source)
            | Self::ServiceDetailUnavailable { source, .. }
            | Self::QuoteUnavailable { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// The service this error belongs to, if it is per-service.
    #[must_use]
    pub fn service(&self) -> Option<&ServiceCode> {
        match self {
            Self::ServiceDetailUnavailable { service, .. }
            | Self::PlanningFailed { service, .. }
            | Self::QuoteUnavailable { service, .. } => Some(service),
            _ => None,
        }
    }
}

/// Result type for quoting operations.
pub type QuotingResult<T> = Result<T, QuoteError>;
