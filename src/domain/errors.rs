//! # Domain Errors
//!
//! Errors raised while building or planning parcels.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A weight or dimension is negative.
    #[error("invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// A code (country, currency, service) is malformed.
    #[error("invalid code: {0}")]
    InvalidCode(String),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// Parcel count does not fit the carrier's counter.
    #[error("parcel count overflow: {0}")]
    ParcelCountOverflow(String),
}

impl DomainError {
    /// Creates an invalid measurement error.
    #[must_use]
    pub fn invalid_measurement(message: impl Into<String>) -> Self {
        Self::InvalidMeasurement(message.into())
    }

    /// Creates an invalid code error.
    #[must_use]
    pub fn invalid_code(message: impl Into<String>) -> Self {
        Self::InvalidCode(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
